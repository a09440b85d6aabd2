//! Event validator.
//!
//! Tags each envelope with the index its language maps to and classifies it.
//! Envelopes whose language is missing or unknown never reach the network.

use curation_indexer_shared::IncomingEnvelope;
use tracing::{debug, instrument, warn};

use crate::config::LanguageIndexTable;
use crate::consumer::{CorpusEvent, ValidatedEnvelope};

/// Output of one validation pass.
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// Envelopes that passed, in arrival order.
    pub valid: Vec<ValidatedEnvelope>,
    /// Message ids of rejected envelopes, in arrival order.
    pub failures: Vec<String>,
}

/// Validator that resolves envelope languages to indices.
pub struct EventValidator {
    languages: LanguageIndexTable,
}

impl EventValidator {
    /// Create a new validator over the given language table.
    pub fn new(languages: LanguageIndexTable) -> Self {
        Self { languages }
    }

    /// Validate a batch of envelopes.
    #[instrument(skip(self, envelopes), fields(envelope_count = envelopes.len()))]
    pub fn validate(&self, envelopes: Vec<IncomingEnvelope>) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for envelope in envelopes {
            let index = envelope
                .payload
                .language()
                .and_then(|language| self.languages.resolve(language))
                .map(str::to_string);

            match index {
                Some(index) => outcome.valid.push(ValidatedEnvelope {
                    message_id: envelope.message_id,
                    index,
                    event: CorpusEvent::classify(envelope.payload),
                }),
                None => {
                    warn!(
                        message_id = %envelope.message_id,
                        detail_type = %envelope.detail_type,
                        language = envelope.payload.language().unwrap_or("<missing>"),
                        "No index for envelope language"
                    );
                    outcome.failures.push(envelope.message_id);
                }
            }
        }

        debug!(
            valid = outcome.valid.len(),
            invalid = outcome.failures.len(),
            "Validated envelope batch"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curation_indexer_shared::{DetailType, EventPayload};
    use serde_json::json;

    fn item_envelope(message_id: &str, language: Option<&str>) -> IncomingEnvelope {
        let mut item = json!({ "externalId": "aaaaa", "url": "http://some-url.com" });
        if let Some(language) = language {
            item["language"] = json!(language);
        }
        IncomingEnvelope {
            message_id: message_id.to_string(),
            detail_type: DetailType::AddApprovedItem,
            payload: EventPayload::ApprovedItem(serde_json::from_value(item).unwrap()),
        }
    }

    #[test]
    fn test_known_language_passes() {
        let validator = EventValidator::new(LanguageIndexTable::default());

        let outcome = validator.validate(vec![item_envelope("m-1", Some("en"))]);

        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.valid[0].index, "corpus_en");
        assert!(matches!(outcome.valid[0].event, CorpusEvent::AddItem(_)));
    }

    #[test]
    fn test_unknown_or_missing_language_fails() {
        let validator = EventValidator::new(LanguageIndexTable::default());

        let outcome = validator.validate(vec![
            item_envelope("m-1", Some("not-language-code")),
            item_envelope("m-2", Some("FR")),
            item_envelope("m-3", None),
        ]);

        assert_eq!(outcome.failures, vec!["m-1".to_string(), "m-3".to_string()]);
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.valid[0].index, "corpus_fr");
    }

    #[test]
    fn test_collection_language_is_used() {
        let validator = EventValidator::new(LanguageIndexTable::default());
        let collection = serde_json::from_value(json!({
            "externalId": "999rsk",
            "slug": "a-slug",
            "language": "de"
        }))
        .unwrap();

        let outcome = validator.validate(vec![IncomingEnvelope {
            message_id: "m-1".to_string(),
            detail_type: DetailType::CollectionCreated,
            payload: EventPayload::Collection(collection),
        }]);

        assert_eq!(outcome.valid[0].index, "corpus_de");
        assert!(matches!(outcome.valid[0].event, CorpusEvent::AddCollection(_)));
    }
}
