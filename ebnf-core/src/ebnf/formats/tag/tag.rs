//! Formatter for the tagged YAML notation
//!
//! The output is always canonical: reading it back and writing again yields the same
//! bytes. Documents without a namespace of their own get the formatter's namespace.

use crate::ebnf::ast::Document;
use crate::ebnf::formats::registry::{FormatError, Formatter};
use crate::ebnf::tagged::{encode_document_with_default, DEFAULT_NAMESPACE};

/// Formatter implementation for the tagged-node notation
#[derive(Debug, Clone)]
pub struct TagFormatter {
    namespace: String,
}

impl TagFormatter {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for TagFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        encode_document_with_default(doc, &self.namespace)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Canonical tagged YAML notation"
    }
}
