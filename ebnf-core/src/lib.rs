//! # ebnf-core
//!
//! Typed syntax trees for ISO 14977 Extended Backus-Naur Form grammars.
//!
//! File Layout
//!
//! A grammar lives in three shapes: the tagged YAML notation used for storage and
//! interchange, the typed tree in memory, and canonical EBNF text. The crate is laid
//! out along those lines:
//!
//! src/ebnf
//!   ├── ast        The node model (Node, Children, RuleTable, Document)
//!   ├── schema     The static construct table: tags, field sets, validation
//!   ├── tagged     Tagged YAML notation: decode, encode, document directives
//!   ├── formats    Output formats (ebnf, yaml, treeviz, json) and their registry
//!   └── testing    Factories and helpers shared by the test suites
//!
//! Reading goes text → [tagged](ebnf::tagged) → [ast](ebnf::ast). Writing goes back through
//! either the tag encoder or the [EBNF renderer](ebnf::formats::ebnf). Both output paths are
//! pure functions of the tree.

#![allow(rustdoc::invalid_html_tags)]

pub mod ebnf;

pub use ebnf::ast::{Children, Document, Node, Repetition, Rule, RuleTable};
pub use ebnf::formats::{render, render_node, FormatError, RenderOptions};
pub use ebnf::tagged::{decode_document, encode_document, TagError, DEFAULT_NAMESPACE};
