//! Tagged-node notation
//!
//! Grammars are persisted as YAML documents where each construct is a node carrying
//! an explicit short tag (`!alt`, `!group`, `!times`, ...) and a scalar, sequence or
//! mapping payload. Untagged scalars, sequences and mappings default to Identifier,
//! Sequence and (at the root only) RuleTable.
//!
//! ```text
//! %TAG ! tag:drosoft.org/ebnf,2016:
//! ---
//! digits: !many1 digit
//! digit: !charrange [ '0', '9' ]
//! ```
//!
//! Reading accepts several legal payload shapes per construct; writing always emits
//! one canonical shape. The guarantee is value equality after a round trip, and
//! byte identity once a document has been written canonically.
//!
//! - [yaml] reads YAML bodies with scalar text kept as written.
//! - [decode] turns YAML nodes into grammar nodes.
//! - [encode] turns grammar nodes into YAML values.
//! - [document] handles the directive header around whole documents.

pub mod decode;
pub mod document;
pub mod encode;
pub mod error;
pub mod yaml;

pub use decode::{decode, decode_node, decode_rule_table};
pub use document::{
    decode_document, encode_document, encode_document_with_default, DEFAULT_NAMESPACE,
};
pub use encode::{encode, encode_node, encode_rule_table};
pub use error::TagError;
pub use yaml::{YamlNode, MAX_NESTING};
