//! Element types
//!
//! One file per concern: the [node](node) enum itself, the single-or-list
//! [children](children) holder, the two structured payloads
//! ([repetition](repetition), [charset](charset)) and the root entities
//! ([rule_table](rule_table), [document](document)).

pub mod charset;
pub mod children;
pub mod document;
pub mod node;
pub mod repetition;
pub mod rule_table;

pub use charset::CharSet;
pub use children::Children;
pub use document::Document;
pub use node::Node;
pub use repetition::Repetition;
pub use rule_table::{Rule, RuleTable};
