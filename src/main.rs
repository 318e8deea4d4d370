// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod api;
mod cli;
mod config;
mod export;
mod runner;
mod types;
mod ui;

use std::io;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Credentials are read once, before any prompt or request
    let service_config = match config::ServiceConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    // Prompts go to stderr so stdout stays a clean export document
    let request = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stderr();
        match config::resolve_request(&args, &mut input, &mut prompt_out) {
            Ok(r) => r,
            Err(e) => {
                ui::print_error(&e);
                std::process::exit(1);
            }
        }
    };

    let client = api::ApiClient::new(service_config);

    let outcome = match runner::run_export(&client, &request) {
        Ok(o) => o,
        Err(e) => {
            ui::print_error(&format!("Export aborted: {}", e));
            std::process::exit(1);
        }
    };

    if outcome.decks_failed > 0 {
        ui::print_warning(&format!(
            "{} deck(s) could not be fetched and were left out of the export",
            outcome.decks_failed
        ));
    }

    let document = export::render_document(&outcome.body);
    if let Err(e) = export::write_document(&document, args.output.as_deref()) {
        ui::print_error(&format!("Failed to write export: {}", e));
        std::process::exit(1);
    }
}
