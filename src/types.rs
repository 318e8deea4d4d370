/// Core data structures for service payloads
///
/// This module defines the JSON shapes returned by the flashcard service.
/// They are read-only inputs: nothing here is mutated after decoding.
use serde::Deserialize;
use std::fmt;

/// Identifier as delivered by the service (integer or string)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    UInt(u64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::UInt(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// Response of the deck cards endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardsPayload {
    pub pack: PackInfo,
    pub deck: DeckInfo,
    pub cards: Vec<Card>,
}

impl CardsPayload {
    /// Display string shared by every row of this deck: "<pack>::<deck>"
    pub fn deck_identity(&self) -> String {
        format!("{}::{}", self.pack.name, self.deck.name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeckInfo {
    pub name: String,
}

/// A single question/answer card
///
/// Every text field is optional; `null`, a missing key and `""` all mean absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_id: ItemId,

    #[serde(default)]
    pub q_md_body: Option<String>,
    #[serde(default)]
    pub q_md_clarifier: Option<String>,
    #[serde(default)]
    pub q_md_footnote: Option<String>,
    #[serde(default)]
    pub q_md_prompt: Option<String>,
    #[serde(default)]
    pub q_original_image_url: Option<String>,

    #[serde(default)]
    pub a_md_body: Option<String>,
    #[serde(default)]
    pub a_md_clarifier: Option<String>,
    #[serde(default)]
    pub a_md_footnote: Option<String>,
    #[serde(default)]
    pub a_md_prompt: Option<String>,
    #[serde(default)]
    pub a_original_image_url: Option<String>,
}

/// One entry of the pack deck enumeration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRef {
    pub deck_id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
}
