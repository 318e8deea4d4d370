/// Tests for runner module
#[cfg(test)]
mod tests {
    use crate::api::{CardSource, FetchError};
    use crate::config::ExportRequest;
    use crate::export::render_deck_block;
    use crate::runner::*;
    use crate::types::{CardsPayload, DeckRef};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Canned responses keyed by deck id, recording every call in order
    #[derive(Default)]
    struct FakeSource {
        decks: Option<Vec<&'static str>>,
        cards: HashMap<&'static str, Result<&'static str, u16>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn with_deck(mut self, deck_id: &'static str, result: Result<&'static str, u16>) -> Self {
            self.cards.insert(deck_id, result);
            self
        }
    }

    impl CardSource for FakeSource {
        fn fetch_cards(&self, pack_id: &str, deck_id: &str) -> Result<CardsPayload, FetchError> {
            self.calls.borrow_mut().push(format!("cards {} {}", pack_id, deck_id));
            let target = format!("pack {} deck {}", pack_id, deck_id);
            match self.cards.get(deck_id) {
                Some(Ok(body)) => serde_json::from_str(body)
                    .map_err(|e| FetchError::Malformed { target, message: e.to_string() }),
                Some(Err(status)) => Err(FetchError::Status { target, status: *status }),
                None => Err(FetchError::Status { target, status: 404 }),
            }
        }

        fn fetch_decks_for_pack(&self, pack_id: &str) -> Result<Vec<DeckRef>, FetchError> {
            self.calls.borrow_mut().push(format!("decks {}", pack_id));
            match &self.decks {
                Some(ids) => Ok(ids
                    .iter()
                    .map(|id| serde_json::from_value(serde_json::json!({ "deckId": id })).unwrap())
                    .collect()),
                None => Err(FetchError::Status { target: format!("pack {}", pack_id), status: 403 }),
            }
        }
    }

    const DECK_A: &str = r#"{"pack":{"name":"Geo"},"deck":{"name":"A"},"cards":[{"cardId":1,"qMdBody":"a1"},{"cardId":2}]}"#;
    const DECK_C: &str = r#"{"pack":{"name":"Geo"},"deck":{"name":"C"},"cards":[{"cardId":3,"aMdBody":"c3"}]}"#;

    fn full_pack() -> ExportRequest {
        ExportRequest::FullPack { pack_id: "7".to_string() }
    }

    fn block(payload: &str) -> String {
        render_deck_block(&serde_json::from_str(payload).unwrap())
    }

    #[test]
    fn test_full_pack_continues_past_failed_deck() {
        let source = FakeSource { decks: Some(vec!["1", "2", "3"]), ..Default::default() }
            .with_deck("1", Ok(DECK_A))
            .with_deck("2", Err(500))
            .with_deck("3", Ok(DECK_C));

        let outcome = run_export(&source, &full_pack()).expect("Should complete");
        assert_eq!(outcome.decks_exported, 2);
        assert_eq!(outcome.decks_failed, 1);

        // Deck A, its newline, the blank line of deck 2, deck C, its newline
        assert_eq!(outcome.body, format!("{}\n\n{}\n", block(DECK_A), block(DECK_C)));
        assert_eq!(outcome.body.matches("Geo::A\t").count(), 2);
        assert_eq!(outcome.body.matches("Geo::C\t").count(), 1);

        assert_eq!(*source.calls.borrow(), vec!["decks 7", "cards 7 1", "cards 7 2", "cards 7 3"]);
    }

    #[test]
    fn test_full_pack_markup_newlines_stay_inside_fields() {
        let source = FakeSource { decks: Some(vec!["1", "2", "3"]), ..Default::default() }
            .with_deck("1", Ok(DECK_A))
            .with_deck("2", Err(500))
            .with_deck("3", Ok(DECK_C));

        let body = run_export(&source, &full_pack()).unwrap().body;

        // Converted paragraphs end in a newline inside the quoted field
        assert!(body.starts_with("Geo::A\t1\t\"<p>a1</p>\n\"\t"));
        assert!(body.contains("\t\"<p>c3</p>\n\"\t"));
        // Deck A ends on card 2's empty image column, then the failed deck's blank line
        assert!(body.contains("\"\"\t\n\nGeo::C\t3\t"));
        assert!(body.ends_with("\t\n"));
    }

    #[test]
    fn test_full_pack_keeps_enumeration_order() {
        let source = FakeSource { decks: Some(vec!["3", "1"]), ..Default::default() }
            .with_deck("1", Ok(DECK_A))
            .with_deck("3", Ok(DECK_C));

        let outcome = run_export(&source, &full_pack()).unwrap();
        let c_pos = outcome.body.find("Geo::C").unwrap();
        let a_pos = outcome.body.find("Geo::A").unwrap();
        assert!(c_pos < a_pos);
    }

    #[test]
    fn test_full_pack_enumeration_failure_yields_empty_body() {
        let source = FakeSource::default();

        let outcome = run_export(&source, &full_pack()).expect("Enumeration failure is not fatal");
        assert_eq!(outcome.body, "");
        assert_eq!(outcome.decks_exported, 0);
        assert_eq!(*source.calls.borrow(), vec!["decks 7"]);
    }

    #[test]
    fn test_single_deck() {
        let source = FakeSource::default().with_deck("1", Ok(DECK_A));
        let request = ExportRequest::SingleDeck { pack_id: "7".to_string(), deck_id: "1".to_string() };

        let outcome = run_export(&source, &request).unwrap();
        assert_eq!(outcome.body, block(DECK_A));
        assert_eq!(outcome.body.matches("Geo::A\t").count(), 2);
        assert!(outcome.body.contains("\"<p>a1</p>\n\""));
        assert!(!outcome.body.ends_with('\n'));
        assert_eq!(outcome.decks_exported, 1);
    }

    #[test]
    fn test_single_deck_failure_yields_empty_body() {
        let source = FakeSource::default().with_deck("1", Err(500));
        let request = ExportRequest::SingleDeck { pack_id: "7".to_string(), deck_id: "1".to_string() };

        let outcome = run_export(&source, &request).unwrap();
        assert_eq!(outcome.body, "");
        assert_eq!(outcome.decks_failed, 1);
    }

    #[test]
    fn test_malformed_payload_stops_run() {
        let source = FakeSource { decks: Some(vec!["1", "2", "3"]), ..Default::default() }
            .with_deck("1", Ok(DECK_A))
            .with_deck("2", Ok(r#"{"pack":{"name":"Geo"},"cards":[]}"#))
            .with_deck("3", Ok(DECK_C));

        let err = run_export(&source, &full_pack()).unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
        // Deck 3 is never fetched
        assert_eq!(source.calls.borrow().len(), 3);
    }
}
