//! Errors raised while reading or writing the tagged-node notation

use crate::ebnf::schema::SchemaError;
use std::fmt;

/// Error that can occur while decoding or encoding a document.
///
/// All of them are fatal for the document: there is no partial output.
#[derive(Debug, Clone, PartialEq)]
pub enum TagError {
    /// A tag that names no construct, or an untagged mapping below the root
    UnknownConstruct { tag: String },
    /// Wrong number or shape of positional payload elements
    Arity {
        construct: &'static str,
        expected: &'static str,
        found: String,
    },
    /// Field-set validation failure
    Schema(SchemaError),
    /// Malformed `%` directive block
    Directive(String),
    /// The body is not valid YAML, or could not be written as YAML
    Yaml(String),
    /// The document nests deeper than `limit` sequence/mapping levels
    TooDeep { limit: usize },
}

impl TagError {
    pub(crate) fn arity(construct: &'static str, expected: &'static str, found: impl Into<String>) -> Self {
        TagError::Arity {
            construct,
            expected,
            found: found.into(),
        }
    }
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::UnknownConstruct { tag } => write!(f, "Unknown construct '{tag}'"),
            TagError::Arity {
                construct,
                expected,
                found,
            } => write!(f, "{construct} expects {expected}, found {found}"),
            TagError::Schema(err) => write!(f, "Schema error: {err}"),
            TagError::Directive(msg) => write!(f, "Directive error: {msg}"),
            TagError::Yaml(msg) => write!(f, "YAML error: {msg}"),
            TagError::TooDeep { limit } => {
                write!(f, "Document nests deeper than {limit} levels")
            }
        }
    }
}

impl std::error::Error for TagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TagError::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for TagError {
    fn from(err: SchemaError) -> Self {
        TagError::Schema(err)
    }
}

impl From<serde_yaml::Error> for TagError {
    fn from(err: serde_yaml::Error) -> Self {
        TagError::Yaml(err.to_string())
    }
}
