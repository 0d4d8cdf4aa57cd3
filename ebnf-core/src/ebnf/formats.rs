//! Output formats for grammar documents
//!
//! This module contains the format implementations for serializing a [Document]:
//! - `ebnf`: canonical ISO 14977 text
//! - `yaml`: the canonical tagged-node notation
//! - `treeviz`, `json`: inspection views built from the AST snapshot
//!
//! [Document]: crate::ebnf::ast::Document

pub mod ebnf;
pub mod json;
pub mod registry;
pub mod tag;
pub mod treeviz;

pub use ebnf::{render, render_node, EbnfFormatter, RenderOptions};
pub use json::{to_json_str, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tag::TagFormatter;
pub use treeviz::{to_treeviz_str, TreevizFormatter};
