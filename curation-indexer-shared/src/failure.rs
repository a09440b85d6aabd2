//! Per-message failure report returned to the queue transport.

use serde::{Deserialize, Serialize};

/// One message the transport should consider unprocessed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}

impl BatchItemFailure {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            item_identifier: message_id.into(),
        }
    }
}

/// Result of processing one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_item_failures: Vec<BatchItemFailure>,
}

impl BatchResponse {
    /// Build a response from message ids, keeping the first occurrence of
    /// each id and dropping repeats.
    pub fn from_message_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut batch_item_failures: Vec<BatchItemFailure> = Vec::new();
        for id in ids {
            let id = id.into();
            if !batch_item_failures.iter().any(|f| f.item_identifier == id) {
                batch_item_failures.push(BatchItemFailure::new(id));
            }
        }
        Self { batch_item_failures }
    }

    pub fn is_empty(&self) -> bool {
        self.batch_item_failures.is_empty()
    }

    /// The failed message ids, in report order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.batch_item_failures
            .iter()
            .map(|f| f.item_identifier.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_message_ids_dedups_in_order() {
        let response = BatchResponse::from_message_ids(["b", "a", "b", "c", "a"]);
        assert_eq!(response.message_ids(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_serialize_wire_shape() {
        let response = BatchResponse::from_message_ids(["123abc"]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "batchItemFailures": [{ "itemIdentifier": "123abc" }] })
        );
    }
}
