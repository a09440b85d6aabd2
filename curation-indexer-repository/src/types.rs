//! Request and response types for bulk operations.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// A bulk request: alternating action lines and source lines.
///
/// The request only knows lines; which line belongs to which operation is
/// decided by whoever builds it. `operation_count` is the number of action
/// lines pushed, which is also the number of items the backend will report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequest {
    lines: Vec<Value>,
    operation_count: usize,
}

impl BulkRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one operation: its action line and, for operations that carry
    /// a document, its source line.
    pub fn push(&mut self, action: Value, source: Option<Value>) {
        self.lines.push(action);
        if let Some(source) = source {
            self.lines.push(source);
        }
        self.operation_count += 1;
    }

    /// All lines in send order.
    pub fn lines(&self) -> &[Value] {
        &self.lines
    }

    /// Number of operations (action lines) in the request.
    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    pub fn is_empty(&self) -> bool {
        self.operation_count == 0
    }

    /// Render the newline-delimited wire body, including the trailing
    /// newline the bulk endpoint requires.
    pub fn to_ndjson(&self) -> String {
        let mut body = String::new();
        for line in &self.lines {
            body.push_str(&line.to_string());
            body.push('\n');
        }
        body
    }
}

/// The outcome of one operation inside a bulk response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl BulkItemResult {
    /// Whether the backend reported an error for this operation.
    ///
    /// A delete of an absent document comes back as `404`/`not_found`
    /// without an error object and counts as success.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The backend error type, e.g. `mapper_parsing_exception`.
    pub fn error_type(&self) -> Option<&str> {
        match self.error.as_ref()? {
            Value::Object(error) => error.get("type").and_then(Value::as_str),
            Value::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The backend error reason, when given.
    pub fn error_reason(&self) -> Option<&str> {
        self.error
            .as_ref()?
            .get("reason")
            .and_then(Value::as_str)
    }
}

/// One entry of the `items` array: a single key naming the action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulkResponseItem {
    #[serde(flatten)]
    actions: BTreeMap<String, BulkItemResult>,
}

impl BulkResponseItem {
    /// The action name and its result.
    pub fn outcome(&self) -> Option<(&str, &BulkItemResult)> {
        self.actions
            .iter()
            .next()
            .map(|(action, result)| (action.as_str(), result))
    }

    pub fn is_error(&self) -> bool {
        self.outcome().map(|(_, result)| result.is_error()).unwrap_or(false)
    }
}

/// A parsed bulk response; `items` are in request order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkResponseItem>,
}

impl BulkResponse {
    /// The response to an empty request, which is never sent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Positions of operations that reported an error.
    pub fn failed_positions(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_error())
            .map(|(position, _)| position)
            .collect()
    }
}
