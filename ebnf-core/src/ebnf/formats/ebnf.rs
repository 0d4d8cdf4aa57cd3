//! EBNF format module declaration
//!
//! Renders a rule table as ISO 14977 text. This direction only: nothing in the crate
//! parses EBNF source.

pub mod render;

pub use render::{render, render_node, EbnfFormatter, RenderOptions};
