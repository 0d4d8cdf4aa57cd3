//! AST definitions for ISO 14977 grammars
//!
//!     The tree is a closed set of node variants. Leaves carry text (a rule reference, a
//!     terminal string, a special sequence, ...) and composites own their children outright:
//!     there is no sharing and no cycles, so every tree can be cloned, compared and walked
//!     without bookkeeping.
//!
//! Documents and Rule Tables
//!
//!     The root of every grammar is a [RuleTable](elements::RuleTable): an ordered mapping from
//!     rule name to its definition. Insertion order is significant, it is the order rules are
//!     written back out. A [Document](elements::Document) pairs the table with the tag namespace
//!     declared by the source text, if any.
//!
//! Single child or list
//!
//!     Grouping constructs (group, repeat, optional) accept either one child or a list of
//!     children. Which one was given is kept in [Children](elements::Children) rather than
//!     flattened, so decoding never loses the shape of its input. For equality purposes a
//!     single child and a one element list are the same value.
//!
//! Uniform access
//!
//!     [AstNode](traits::AstNode) gives every node a type name, a short label and a child list.
//!     The [snapshot](snapshot) module builds on it to produce the normalized tree that the
//!     inspection formats (treeviz, json) print.

pub mod elements;
pub mod snapshot;
pub mod traits;

pub use elements::{CharSet, Children, Document, Node, Repetition, Rule, RuleTable};
pub use snapshot::{snapshot_from_document, snapshot_from_node, AstSnapshot};
pub use traits::AstNode;
