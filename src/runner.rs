/// Export pipeline
///
/// Fetch and render run strictly in sequence, one deck at a time. A deck
/// whose fetch fails with an HTTP or transport error is reported and
/// contributes no rows; the remaining decks are still exported. A payload
/// with the wrong shape stops the run.
use crate::api::{CardSource, FetchError};
use crate::config::ExportRequest;
use crate::export;
use crate::ui;
use log::{debug, info};

/// Result of one export run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportOutcome {
    /// Document body (rows only, no header)
    pub body: String,
    pub decks_exported: usize,
    pub decks_failed: usize,
}

/// Run the export described by `request` against `source`
pub fn run_export<S: CardSource + ?Sized>(source: &S, request: &ExportRequest) -> Result<ExportOutcome, FetchError> {
    let outcome = match request {
        ExportRequest::SingleDeck { pack_id, deck_id } => export_single_deck(source, pack_id, deck_id)?,
        ExportRequest::FullPack { pack_id } => export_full_pack(source, pack_id)?,
    };

    info!("exported {} deck(s), {} failed", outcome.decks_exported, outcome.decks_failed);
    Ok(outcome)
}

fn export_single_deck<S: CardSource + ?Sized>(
    source: &S,
    pack_id: &str,
    deck_id: &str,
) -> Result<ExportOutcome, FetchError> {
    let mut outcome = ExportOutcome::default();
    match export_deck(source, pack_id, deck_id)? {
        Some(block) => {
            outcome.body = block;
            outcome.decks_exported = 1;
        }
        None => outcome.decks_failed = 1,
    }
    Ok(outcome)
}

fn export_full_pack<S: CardSource + ?Sized>(source: &S, pack_id: &str) -> Result<ExportOutcome, FetchError> {
    let mut outcome = ExportOutcome::default();

    let decks = match source.fetch_decks_for_pack(pack_id) {
        Ok(decks) => decks,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            ui::print_error(&e.to_string());
            return Ok(outcome);
        }
    };

    debug!("exporting {} decks of pack {}", decks.len(), pack_id);

    // Each deck contributes its block plus a newline; a failed deck leaves a blank line
    for deck in &decks {
        let deck_id = deck.deck_id.to_string();
        debug!("deck {} ({})", deck_id, deck.name.as_deref().unwrap_or("unnamed"));
        match export_deck(source, pack_id, &deck_id)? {
            Some(block) => {
                outcome.body.push_str(&block);
                outcome.decks_exported += 1;
            }
            None => outcome.decks_failed += 1,
        }
        outcome.body.push('\n');
    }

    Ok(outcome)
}

/// Fetch and render one deck; `None` when the fetch failed and was reported
fn export_deck<S: CardSource + ?Sized>(
    source: &S,
    pack_id: &str,
    deck_id: &str,
) -> Result<Option<String>, FetchError> {
    match source.fetch_cards(pack_id, deck_id) {
        Ok(payload) => Ok(Some(export::render_deck_block(&payload))),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            ui::print_error(&e.to_string());
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
