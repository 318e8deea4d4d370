/// Configuration resolution module
///
/// This module handles:
/// - Loading service credentials into an explicit `ServiceConfig`
/// - Resolving CLI arguments into an `ExportRequest`
/// - Prompting for missing ids on an interactive reader
use crate::cli::CliArgs;
use log::{debug, warn};
use std::env;
use std::io::{BufRead, Write};

pub const ENV_USERID: &str = "BRAINCARDS_USERID";
pub const ENV_APIKEY: &str = "BRAINCARDS_APIKEY";
pub const ENV_NAME: &str = "BRAINCARDS_NAME";
pub const ENV_API_BASE: &str = "BRAINCARDS_API_BASE";

/// Credentials and host for the flashcard service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub user_id: String,
    pub api_key: String,
    /// Service token used for the host and the credential header names
    pub service_name: String,
    /// Overrides `https://api.<name>.com`
    pub api_base: Option<String>,
}

impl ServiceConfig {
    pub fn new(user_id: &str, api_key: &str, service_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            api_key: api_key.to_string(),
            service_name: service_name.to_string(),
            api_base: None,
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// Empty values count as missing. All missing required variables are
    /// reported in one error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user_id = get(ENV_USERID);
        let api_key = get(ENV_APIKEY);
        let service_name = get(ENV_NAME);

        match (user_id, api_key, service_name) {
            (Some(user_id), Some(api_key), Some(service_name)) => {
                let mut config = Self::new(&user_id, &api_key, &service_name);
                config.api_base = get(ENV_API_BASE).map(|b| b.trim_end_matches('/').to_string());
                debug!("Loaded service config for {} (api base override: {:?})", service_name, config.api_base);
                Ok(config)
            }
            (user_id, api_key, service_name) => {
                let missing: Vec<&str> = [
                    (ENV_USERID, user_id.is_none()),
                    (ENV_APIKEY, api_key.is_none()),
                    (ENV_NAME, service_name.is_none()),
                ]
                .iter()
                .filter(|(_, is_missing)| *is_missing)
                .map(|(key, _)| *key)
                .collect();
                Err(format!("Missing environment variable(s): {}", missing.join(", ")))
            }
        }
    }

    /// Base URL requests are issued against
    pub fn api_base(&self) -> String {
        self.api_base.clone().unwrap_or_else(|| format!("https://api.{}.com", self.service_name))
    }

    pub fn userid_header(&self) -> String {
        format!("x-{}-userid", self.service_name)
    }

    pub fn apikey_header(&self) -> String {
        format!("x-{}-apikey", self.service_name)
    }
}

/// What to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRequest {
    SingleDeck { pack_id: String, deck_id: String },
    FullPack { pack_id: String },
}

/// Resolve CLI arguments into an export request
///
/// Missing pack/deck ids (outside full-pack mode) are prompted for on
/// `input`, with prompts written to `prompt_out`.
pub fn resolve_request<R, W>(args: &CliArgs, input: &mut R, prompt_out: &mut W) -> Result<ExportRequest, String>
where
    R: BufRead,
    W: Write,
{
    if args.full_pack {
        let pack_id = args.pack.ok_or_else(|| "--full-pack requires --pack".to_string())?;
        if let Some(deck) = args.deck {
            warn!("Ignoring --deck {} in full-pack mode", deck);
        }
        return Ok(ExportRequest::FullPack { pack_id: pack_id.to_string() });
    }

    let pack_id = match args.pack {
        Some(p) => p.to_string(),
        None => prompt_for("pack ID", input, prompt_out)?,
    };
    let deck_id = match args.deck {
        Some(d) => d.to_string(),
        None => prompt_for("deck ID", input, prompt_out)?,
    };

    Ok(ExportRequest::SingleDeck { pack_id, deck_id })
}

/// Prompt for one value and read a line of input, without the line ending
pub fn prompt_for<R, W>(label: &str, input: &mut R, prompt_out: &mut W) -> Result<String, String>
where
    R: BufRead,
    W: Write,
{
    write!(prompt_out, "Enter {}: ", label).map_err(|e| format!("Failed to write prompt: {}", e))?;
    prompt_out.flush().map_err(|e| format!("Failed to write prompt: {}", e))?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| format!("Failed to read {}: {}", label, e))?;
    if read == 0 {
        return Err(format!("No {} entered (input closed)", label));
    }

    // Entered text is used as-is; a bad id surfaces as a failed request
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
