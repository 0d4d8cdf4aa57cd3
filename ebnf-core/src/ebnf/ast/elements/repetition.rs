//! Bounded repetition payload
//!
//! ISO 14977 only spells exact repetition (`3 * a`). The model also carries a
//! distinct minimum and maximum so that documents written for richer targets can
//! be stored and re-encoded, but such a node cannot be rendered as EBNF.

use super::node::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    pub target: Box<Node>,
    pub minimum: u64,
    pub maximum: u64,
    pub lazy: bool,
}

impl Repetition {
    pub fn exact(target: Node, count: u64) -> Self {
        Self::bounded(target, count, count)
    }

    pub fn bounded(target: Node, minimum: u64, maximum: u64) -> Self {
        Self {
            target: Box::new(target),
            minimum,
            maximum,
            lazy: false,
        }
    }

    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn is_exact(&self) -> bool {
        self.minimum == self.maximum
    }
}
