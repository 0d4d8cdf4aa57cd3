//! JSON format module declaration
//!
//! Serializes the AST snapshot, for tools that want the tree without reading YAML tags.

#[allow(clippy::module_inception)]
pub mod json;

pub use json::{to_json_str, JsonFormatter};
