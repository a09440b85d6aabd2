//! Index commands: the unit of work sent to the search backend.

use serde_json::{Map, Value};

/// The kind of write a command performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkOp {
    /// Full document replace (create if absent).
    Upsert,
    /// Partial merge into an existing document.
    Update,
    /// Remove the document; a no-op if it is already absent.
    Delete,
}

impl BulkOp {
    /// Name of the bulk action for this operation.
    pub fn action(&self) -> &'static str {
        match self {
            BulkOp::Upsert => "index",
            BulkOp::Update => "update",
            BulkOp::Delete => "delete",
        }
    }
}

impl std::fmt::Display for BulkOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.action())
    }
}

/// A single write against one index.
///
/// `doc_id` is always the upstream stable external id, so the same event
/// compiled twice produces the same command.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexCommand {
    pub op: BulkOp,
    pub index: String,
    pub doc_id: String,
    pub body: Option<Map<String, Value>>,
}

impl IndexCommand {
    /// Build a full-document upsert.
    pub fn upsert(
        index: impl Into<String>,
        doc_id: impl Into<String>,
        body: Map<String, Value>,
    ) -> Self {
        Self {
            op: BulkOp::Upsert,
            index: index.into(),
            doc_id: doc_id.into(),
            body: Some(body),
        }
    }

    /// Build a partial-document update.
    pub fn update(
        index: impl Into<String>,
        doc_id: impl Into<String>,
        fields: Map<String, Value>,
    ) -> Self {
        Self {
            op: BulkOp::Update,
            index: index.into(),
            doc_id: doc_id.into(),
            body: Some(fields),
        }
    }

    /// Build a delete.
    pub fn delete(index: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            op: BulkOp::Delete,
            index: index.into(),
            doc_id: doc_id.into(),
            body: None,
        }
    }

    /// Read a body field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get(name))
    }
}
