//! Bulk request assembler.
//!
//! Flattens compiled commands into one bulk request and remembers which
//! message owns each operation position.

use curation_indexer_repository::BulkRequest;
use curation_indexer_shared::{BulkOp, IndexCommand};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// A bulk request plus the owner of each of its operations.
#[derive(Debug, Default)]
pub struct AssembledBatch {
    request: BulkRequest,
    commands: Vec<IndexCommand>,
    owners: Vec<String>,
}

impl AssembledBatch {
    /// The request to send.
    pub fn request(&self) -> &BulkRequest {
        &self.request
    }

    /// Number of operations in the request.
    pub fn operation_count(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Message id owning the operation at `position`.
    pub fn owner(&self, position: usize) -> Option<&str> {
        self.owners.get(position).map(String::as_str)
    }

    /// The command at `position`.
    pub fn command(&self, position: usize) -> Option<&IndexCommand> {
        self.commands.get(position)
    }
}

/// Assembler that turns per-message commands into one bulk request.
#[derive(Debug, Default)]
pub struct BulkRequestAssembler;

impl BulkRequestAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Flatten commands in message order, then emission order.
    #[instrument(skip(self, compiled), fields(message_count = compiled.len()))]
    pub fn assemble(&self, compiled: Vec<(String, Vec<IndexCommand>)>) -> AssembledBatch {
        let mut batch = AssembledBatch::default();

        for (message_id, commands) in compiled {
            for command in commands {
                batch.request.push(action_line(&command), source_line(&command));
                batch.owners.push(message_id.clone());
                batch.commands.push(command);
            }
        }

        debug!(
            operation_count = batch.operation_count(),
            "Assembled bulk request"
        );
        batch
    }
}

/// `{"<action>": {"_index": ..., "_id": ...}}`
fn action_line(command: &IndexCommand) -> Value {
    let mut target = Map::new();
    target.insert("_index".to_string(), Value::from(command.index.as_str()));
    target.insert("_id".to_string(), Value::from(command.doc_id.as_str()));

    let mut action = Map::new();
    action.insert(command.op.action().to_string(), Value::Object(target));
    Value::Object(action)
}

fn source_line(command: &IndexCommand) -> Option<Value> {
    let body = command.body.clone().unwrap_or_default();
    match command.op {
        BulkOp::Upsert => Some(Value::Object(body)),
        BulkOp::Update => {
            let mut partial = Map::new();
            partial.insert("doc".to_string(), Value::Object(body));
            Some(Value::Object(partial))
        }
        BulkOp::Delete => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_assemble_ndjson() {
        let batch = BulkRequestAssembler::new().assemble(vec![
            (
                "m-1".to_string(),
                vec![
                    IndexCommand::upsert("corpus_en", "aaaaa", body(json!({ "title": "t" }))),
                    IndexCommand::delete("corpus_en", "dup-id"),
                ],
            ),
            (
                "m-2".to_string(),
                vec![IndexCommand::update(
                    "corpus_en",
                    "999rsk",
                    body(json!({ "topic": "FOOD" })),
                )],
            ),
        ]);

        let expected = [
            r#"{"index":{"_id":"aaaaa","_index":"corpus_en"}}"#,
            r#"{"title":"t"}"#,
            r#"{"delete":{"_id":"dup-id","_index":"corpus_en"}}"#,
            r#"{"update":{"_id":"999rsk","_index":"corpus_en"}}"#,
            r#"{"doc":{"topic":"FOOD"}}"#,
        ];
        let parsed: Vec<Value> = batch
            .request()
            .to_ndjson()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let expected: Vec<Value> = expected
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, expected);
        assert!(batch.request().to_ndjson().ends_with('\n'));

        assert_eq!(batch.operation_count(), 3);
        assert_eq!(batch.owner(0), Some("m-1"));
        assert_eq!(batch.owner(1), Some("m-1"));
        assert_eq!(batch.owner(2), Some("m-2"));
        assert_eq!(batch.owner(3), None);
        assert_eq!(batch.command(1).map(|c| c.doc_id.as_str()), Some("dup-id"));
    }

    #[test]
    fn test_messages_without_commands_add_nothing() {
        let batch = BulkRequestAssembler::new().assemble(vec![("m-1".to_string(), vec![])]);
        assert!(batch.is_empty());
        assert!(batch.request().is_empty());
    }
}
