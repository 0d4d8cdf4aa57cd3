//! JSON view of a document's AST snapshot

use crate::ebnf::ast::{snapshot_from_document, Document};
use crate::ebnf::formats::registry::{FormatError, Formatter};

/// Pretty-printed JSON of the document snapshot
pub fn to_json_str(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(&snapshot_from_document(doc))
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}

/// Formatter implementation for json format
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_str(doc)
    }

    fn description(&self) -> &str {
        "AST snapshot as JSON"
    }
}
