//! Tagged-node format module declaration
//!
//! Writes a document back in the canonical tagged YAML notation.

#[allow(clippy::module_inception)]
pub mod tag;

pub use tag::TagFormatter;
