/// Tab-separated import format rendering
///
/// This module handles:
/// - Converting markup fields to HTML and quoting them
/// - Rendering image URLs as `<img>` fields
/// - Joining fields into rows and rows into deck blocks
/// - The fixed document header and the output sink
///
/// The destination escaping rule is a single transform: every literal `"`
/// is doubled before the field is wrapped in quotes. Tabs and newlines
/// produced by the converter are passed through untouched.
use crate::types::{Card, CardsPayload};
use log::debug;
use pulldown_cmark::{Options, Parser, html};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Header lines understood by the importing application
pub const DOCUMENT_HEADER: [&str; 3] = ["#separator:tab", "#html:true", "#deck column:1"];

/// Number of columns in every rendered row
pub const ROW_COLUMNS: usize = 12;

/// Convert lightweight markup to HTML
pub fn markup_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::empty());
    let mut out = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut out, parser);
    out
}

/// Apply the destination escaping rule (`"` becomes `""`)
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Render a markup field as a quoted HTML field
///
/// Absent and empty input both yield `""` (an empty quoted field).
pub fn render_markup_field(raw: Option<&str>) -> String {
    let converted = match raw {
        Some(s) if !s.is_empty() => markup_to_html(s),
        _ => String::new(),
    };
    format!("\"{}\"", escape_quotes(&converted))
}

/// Render an image URL as a quoted `<img>` field
///
/// Absent and empty input yield a zero-length, unquoted column.
pub fn render_image_field(url: Option<&str>) -> String {
    match url {
        Some(u) if !u.is_empty() => format!("\"<img src=\"\"{}\"\">\"", u),
        _ => String::new(),
    }
}

/// Render one card as a tab-separated row
pub fn render_row(deck_identity: &str, card: &Card) -> String {
    let columns: [String; ROW_COLUMNS] = [
        deck_identity.to_string(),
        card.card_id.to_string(),
        render_markup_field(card.q_md_body.as_deref()),
        render_markup_field(card.q_md_clarifier.as_deref()),
        render_markup_field(card.q_md_footnote.as_deref()),
        render_markup_field(card.q_md_prompt.as_deref()),
        render_image_field(card.q_original_image_url.as_deref()),
        render_markup_field(card.a_md_body.as_deref()),
        render_markup_field(card.a_md_clarifier.as_deref()),
        render_markup_field(card.a_md_footnote.as_deref()),
        render_markup_field(card.a_md_prompt.as_deref()),
        render_image_field(card.a_original_image_url.as_deref()),
    ];
    columns.join("\t")
}

/// Render every card of a deck, one row per line, in payload order
pub fn render_deck_block(payload: &CardsPayload) -> String {
    let deck_identity = payload.deck_identity();
    debug!("rendering {} cards for {}", payload.cards.len(), deck_identity);

    payload.cards.iter().map(|card| render_row(&deck_identity, card)).collect::<Vec<_>>().join("\n")
}

/// Prefix the body with the fixed three-line header
pub fn render_document(body: &str) -> String {
    format!("{}\n{}", DOCUMENT_HEADER.join("\n"), body)
}

/// Write the document (plus a trailing newline) to a file, or stdout when no path is given
pub fn write_document(document: &str, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => {
            debug!("writing export to {:?}", path);
            let mut file = File::create(path)?;
            writeln!(file, "{}", document)?;
            file.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", document)?;
            handle.flush()
        }
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
