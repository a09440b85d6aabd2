//! Command compiler implementation.
//!
//! Transforms validated, resolved envelopes into ordered index commands.
//! Compilation is pure: the same envelope always yields the same commands.

use curation_indexer_shared::IndexCommand;
use tracing::{debug, instrument};

use crate::compiler::documents::{collection_document, item_document, merge_fields, story_document};
use crate::config::GradeRankTable;
use crate::consumer::{CorpusEvent, ValidatedEnvelope};

/// Compiler that transforms corpus events into index commands.
pub struct CommandCompiler {
    grades: GradeRankTable,
}

impl CommandCompiler {
    /// Create a new compiler with the given grade table.
    pub fn new(grades: GradeRankTable) -> Self {
        Self { grades }
    }

    /// Compile every envelope, keeping each envelope's commands together
    /// with its message id.
    #[instrument(skip(self, envelopes), fields(envelope_count = envelopes.len()))]
    pub fn compile_batch(&self, envelopes: &[ValidatedEnvelope]) -> Vec<(String, Vec<IndexCommand>)> {
        let compiled: Vec<(String, Vec<IndexCommand>)> = envelopes
            .iter()
            .map(|envelope| (envelope.message_id.clone(), self.compile(envelope)))
            .collect();

        debug!(
            command_count = compiled.iter().map(|(_, commands)| commands.len()).sum::<usize>(),
            "Compiled envelope batch"
        );
        compiled
    }

    /// Compile one envelope into zero or more commands, in emission order.
    pub fn compile(&self, envelope: &ValidatedEnvelope) -> Vec<IndexCommand> {
        let index = envelope.index.as_str();

        match &envelope.event {
            CorpusEvent::AddItem(item) => {
                vec![IndexCommand::upsert(
                    index,
                    &item.external_id,
                    item_document(item, &self.grades),
                )]
            }
            CorpusEvent::RemoveItem(removal) => {
                vec![IndexCommand::delete(index, &removal.external_id)]
            }
            CorpusEvent::AddCollection(collection) => {
                let parent = collection_document(collection);
                let stories = collection.stories.iter().map(|story| {
                    IndexCommand::upsert(
                        index,
                        &story.external_id,
                        story_document(story, &collection.external_id, &parent),
                    )
                });

                let mut commands = Vec::with_capacity(collection.stories.len() + 1);
                commands.push(IndexCommand::upsert(index, &collection.external_id, parent.clone()));
                commands.extend(stories);
                commands
            }
            CorpusEvent::MergeCollectionCopy {
                item,
                collection_id,
            } => match collection_id {
                Some(collection_id) => vec![IndexCommand::update(
                    index,
                    collection_id,
                    merge_fields(item, &self.grades),
                )],
                None => {
                    debug!(
                        message_id = %envelope.message_id,
                        corpus_id = %item.external_id,
                        "No collection resolved, nothing to merge"
                    );
                    Vec::new()
                }
            },
            CorpusEvent::AddSyndicatedItem { item, duplicate_id } => {
                let mut commands = vec![IndexCommand::upsert(
                    index,
                    &item.external_id,
                    item_document(item, &self.grades),
                )];
                if let Some(duplicate_id) = duplicate_id {
                    commands.push(IndexCommand::delete(index, duplicate_id));
                }
                commands
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curation_indexer_shared::{ApprovedItemPayload, BulkOp, EventPayload};
    use serde_json::{json, Value};

    fn compiler() -> CommandCompiler {
        CommandCompiler::new(GradeRankTable::default())
    }

    fn envelope(index: &str, event: CorpusEvent) -> ValidatedEnvelope {
        ValidatedEnvelope {
            message_id: "m-1".to_string(),
            index: index.to_string(),
            event,
        }
    }

    fn item_event(value: Value) -> CorpusEvent {
        CorpusEvent::classify(EventPayload::ApprovedItem(serde_json::from_value(value).unwrap()))
    }

    fn collection_event(story_ids: &[&str]) -> CorpusEvent {
        let stories: Vec<Value> = story_ids
            .iter()
            .map(|id| json!({ "externalId": id, "url": format!("http://{}.com", id) }))
            .collect();
        let collection = serde_json::from_value(json!({
            "externalId": "999rsk",
            "slug": "best-of",
            "language": "de",
            "status": "PUBLISHED",
            "stories": stories
        }))
        .unwrap();
        CorpusEvent::classify(EventPayload::Collection(collection))
    }

    #[test]
    fn test_add_item_is_single_upsert() {
        let commands = compiler().compile(&envelope(
            "corpus_en",
            item_event(json!({ "externalId": "aaaaa", "url": "http://some-url.com", "language": "en" })),
        ));

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].op, BulkOp::Upsert);
        assert_eq!(commands[0].index, "corpus_en");
        assert_eq!(commands[0].doc_id, "aaaaa");
        assert_eq!(commands[0].field("is_collection_story"), Some(&json!(false)));
    }

    #[test]
    fn test_remove_item_is_single_delete() {
        let removal = serde_json::from_value(json!({ "externalId": "bbbbb", "language": "en" })).unwrap();
        let commands = compiler().compile(&envelope(
            "corpus_en",
            CorpusEvent::classify(EventPayload::Removal(removal)),
        ));

        assert_eq!(commands, vec![IndexCommand::delete("corpus_en", "bbbbb")]);
    }

    #[test]
    fn test_collection_fans_out_to_stories() {
        let commands = compiler().compile(&envelope(
            "corpus_de",
            collection_event(&["888jsn", "777yeet"]),
        ));

        assert_eq!(commands.len(), 3);
        assert!(commands.iter().all(|c| c.op == BulkOp::Upsert && c.index == "corpus_de"));

        let ids: Vec<&str> = commands.iter().map(|c| c.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["999rsk", "888jsn", "777yeet"]);

        assert_eq!(commands[0].field("is_collection"), Some(&json!(true)));
        assert_eq!(commands[0].field("is_collection_story"), Some(&json!(false)));
        for story in &commands[1..] {
            assert_eq!(story.field("is_collection_story"), Some(&json!(true)));
            assert_eq!(story.field("is_collection"), Some(&json!(false)));
            assert_eq!(story.field("parent_collection_id"), Some(&json!("999rsk")));
            assert_eq!(story.field("status"), Some(&json!("PUBLISHED")));
        }
    }

    #[test]
    fn test_collection_without_stories() {
        let commands = compiler().compile(&envelope("corpus_de", collection_event(&[])));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].doc_id, "999rsk");
    }

    #[test]
    fn test_syndicated_item_with_and_without_duplicate() {
        let item: ApprovedItemPayload = serde_json::from_value(json!({
            "externalId": "aaaaa",
            "url": "http://some-url.com",
            "isSyndicated": true
        }))
        .unwrap();

        let with_dup = compiler().compile(&envelope(
            "corpus_en",
            CorpusEvent::AddSyndicatedItem {
                item: item.clone(),
                duplicate_id: Some("dup-id".to_string()),
            },
        ));
        assert_eq!(with_dup.len(), 2);
        assert_eq!(with_dup[0].op, BulkOp::Upsert);
        assert_eq!(with_dup[0].field("is_syndicated"), Some(&json!(true)));
        assert_eq!(with_dup[1], IndexCommand::delete("corpus_en", "dup-id"));

        let without_dup = compiler().compile(&envelope(
            "corpus_en",
            CorpusEvent::AddSyndicatedItem {
                item,
                duplicate_id: None,
            },
        ));
        assert_eq!(without_dup.len(), 1);
        assert_eq!(without_dup[0].doc_id, "aaaaa");
    }

    #[test]
    fn test_merge_collection_copy() {
        let item = serde_json::from_value(json!({
            "externalId": "ccccc",
            "url": "https://getpocket.com/collections/best-of",
            "isCollection": true,
            "publisher": "Pocket",
            "grade": "A"
        }))
        .unwrap();

        let resolved = compiler().compile(&envelope(
            "corpus_en",
            CorpusEvent::MergeCollectionCopy {
                item,
                collection_id: Some("999rsk".to_string()),
            },
        ));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].op, BulkOp::Update);
        assert_eq!(resolved[0].doc_id, "999rsk");
        assert_eq!(resolved[0].field("publisher"), Some(&json!("Pocket")));
        assert_eq!(resolved[0].field("quality_rank"), Some(&json!(3)));
        assert_eq!(resolved[0].field("title"), None);
    }

    #[test]
    fn test_unresolved_merge_compiles_to_nothing() {
        let event = item_event(json!({
            "externalId": "ccccc",
            "url": "https://getpocket.com/collections/best-of",
            "isCollection": true
        }));
        assert!(compiler().compile(&envelope("corpus_en", event)).is_empty());
    }

    #[test]
    fn test_compile_is_deterministic() {
        let env = envelope("corpus_de", collection_event(&["888jsn"]));
        assert_eq!(compiler().compile(&env), compiler().compile(&env));
    }

    #[test]
    fn test_compile_batch_keeps_owners() {
        let batch = vec![
            envelope("corpus_de", collection_event(&["888jsn"])),
            ValidatedEnvelope {
                message_id: "m-2".to_string(),
                ..envelope(
                    "corpus_en",
                    item_event(json!({ "externalId": "aaaaa", "url": "u" })),
                )
            },
        ];

        let compiled = compiler().compile_batch(&batch);

        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].0, "m-1");
        assert_eq!(compiled[0].1.len(), 2);
        assert_eq!(compiled[1].0, "m-2");
        assert_eq!(compiled[1].1.len(), 1);
    }
}
