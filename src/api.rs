/// API module for interacting with the flashcard service
///
/// This module provides the card fetcher: one GET per deck for its cards,
/// and one GET per pack to enumerate its decks. There are no retries; a
/// failed request is returned to the caller as a `FetchError`.
use crate::config::ServiceConfig;
use crate::types::{CardsPayload, DeckRef};
use log::debug;
use serde::de::DeserializeOwned;
use std::io::Read;
use thiserror::Error;

const USER_AGENT: &str = concat!("braincards-export/", env!("CARGO_PKG_VERSION"));

/// Errors from a single fetch; `target` names the pack/deck involved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("error fetching {target}: HTTP status {status}")]
    Status { target: String, status: u16 },

    #[error("error fetching {target}: {message}")]
    Transport { target: String, message: String },

    #[error("unexpected response shape for {target}: {message}")]
    Malformed { target: String, message: String },
}

impl FetchError {
    /// Whether the run should stop instead of skipping the affected deck
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Malformed { .. })
    }
}

/// Source of card data, implemented by the HTTP client
pub trait CardSource {
    /// Fetch the cards of one deck
    fn fetch_cards(&self, pack_id: &str, deck_id: &str) -> Result<CardsPayload, FetchError>;

    /// Enumerate the decks of a pack, in service order
    fn fetch_decks_for_pack(&self, pack_id: &str) -> Result<Vec<DeckRef>, FetchError>;
}

/// Build the deck cards URL
pub fn cards_url(api_base: &str, pack_id: &str, deck_id: &str) -> String {
    format!("{}/api/v2/packs/{}/decks/{}/cards", api_base, pack_id, deck_id)
}

/// Build the pack deck enumeration URL
pub fn pack_decks_url(api_base: &str, pack_id: &str) -> String {
    format!("{}/api/v2/market/packs/{}/decks", api_base, pack_id)
}

/// Blocking HTTP client for the flashcard service
pub struct ApiClient {
    config: ServiceConfig,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(config: ServiceConfig) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        Self { config, agent }
    }

    /// Issue an authenticated GET and decode a 200 JSON body
    fn get_json<T: DeserializeOwned>(&self, url: &str, target: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let request = self
            .agent
            .get(url)
            .set("accept", "*/*")
            .set("accept-language", "en-US,en;q=0.9")
            .set("cache-control", "no-cache")
            .set("content-type", "application/json")
            .set("pragma", "no-cache")
            .set(&self.config.userid_header(), &self.config.user_id)
            .set(&self.config.apikey_header(), &self.config.api_key);

        let response = match request.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status { target: target.to_string(), status });
            }
            Err(e) => {
                return Err(FetchError::Transport { target: target.to_string(), message: e.to_string() });
            }
        };

        // Redirects are followed, anything else but 200 is a failure
        if response.status() != 200 {
            return Err(FetchError::Status { target: target.to_string(), status: response.status() });
        }

        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| FetchError::Transport { target: target.to_string(), message: e.to_string() })?;

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed { target: target.to_string(), message: e.to_string() })
    }
}

impl CardSource for ApiClient {
    fn fetch_cards(&self, pack_id: &str, deck_id: &str) -> Result<CardsPayload, FetchError> {
        let url = cards_url(&self.config.api_base(), pack_id, deck_id);
        let payload: CardsPayload = self.get_json(&url, &format!("pack {} deck {}", pack_id, deck_id))?;
        debug!("pack {} deck {}: {} cards", pack_id, deck_id, payload.cards.len());
        Ok(payload)
    }

    fn fetch_decks_for_pack(&self, pack_id: &str) -> Result<Vec<DeckRef>, FetchError> {
        let url = pack_decks_url(&self.config.api_base(), pack_id);
        let decks: Vec<DeckRef> = self.get_json(&url, &format!("pack {}", pack_id))?;
        debug!("pack {}: {} decks", pack_id, decks.len());
        Ok(decks)
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
