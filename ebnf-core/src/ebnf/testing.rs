//! Testing utilities for the tagged notation and AST assertions
//!
//!     Grammar tests mostly look at two things: what tree a piece of tagged YAML reads
//!     as, and what text a tree writes as. The helpers here keep both short:
//!
//!         - [read_rule] decodes `top: <body>` and returns the definition of `top`.
//!         - [write_rule] encodes a single definition and returns the YAML body line(s)
//!           after `top:`, without the directive header.
//!         - [assert_node] is a small fluent API over a node, so tests state the shape
//!           they expect instead of matching variants by hand.
//!
//!     Example:
//!
//!     ```rust,ignore
//!     use ebnf_core::ebnf::testing::{assert_node, read_rule};
//!     use ebnf_core::ebnf::schema::Kind;
//!
//!     let node = read_rule("!many1 [digit, !opt sign]");
//!     assert_node(&node)
//!         .is(Kind::RepeatOneOrMore)
//!         .list(2)
//!         .child(0, |c| c.identifier("digit"))
//!         .child(1, |c| c.is(Kind::Optional).single(|inner| inner.identifier("sign")));
//!     ```
//!
//!     The helpers panic with the offending input on failure; they are meant for tests only.

use crate::ebnf::ast::{AstNode, Children, Document, Node, RuleTable};
use crate::ebnf::schema::Kind;
use crate::ebnf::tagged::{decode_document, encode_document, DEFAULT_NAMESPACE};

/// Directive block that opens every canonical document
pub const TAG_HEADER: &str = "%TAG ! tag:drosoft.org/ebnf,2016:\n---\n";

/// Prefix `body` with the canonical directive block.
pub fn with_header(body: &str) -> String {
    format!("%TAG ! {DEFAULT_NAMESPACE}\n---\n{body}")
}

/// Decode a full document, panicking with the input on failure.
pub fn read(text: &str) -> Document {
    decode_document(text).unwrap_or_else(|err| panic!("failed to decode {text:?}: {err}"))
}

/// Decode `top: <body>` and return the definition of `top`.
pub fn read_rule(body: &str) -> Node {
    let doc = read(&with_header(&format!("top: {body}\n")));
    match doc.rules.get("top") {
        Some(node) => node.clone(),
        None => panic!("rule 'top' missing after decoding {body:?}"),
    }
}

/// Encode a document and strip the directive block.
pub fn write(doc: &Document) -> String {
    let text = encode_document(doc).unwrap_or_else(|err| panic!("failed to encode: {err}"));
    match text.split_once("---\n") {
        Some((_, body)) => body.to_string(),
        None => panic!("encoded document has no '---' marker: {text:?}"),
    }
}

/// Encode `top: <node>` and return what follows `top:`.
pub fn write_rule(node: Node) -> String {
    let body = write(&Document::new(rules(vec![("top", node)])));
    match body.strip_prefix("top:") {
        Some(rest) => rest.to_string(),
        None => panic!("unexpected encoding {body:?}"),
    }
}

/// Build a rule table, panicking on invalid names.
pub fn rules(entries: Vec<(&str, Node)>) -> RuleTable {
    RuleTable::from_rules(entries).unwrap_or_else(|err| panic!("invalid rule table: {err}"))
}

/// Start a fluent assertion on `node`.
pub fn assert_node(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: "node".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Assert the construct kind
    pub fn is(self, kind: Kind) -> Self {
        assert_eq!(
            self.node.kind(),
            kind,
            "{}: expected {kind}, found {:?}",
            self.context,
            self.node
        );
        self
    }

    /// Assert this is a reference to `name`
    pub fn identifier(self, name: &str) -> Self {
        match self.node {
            Node::Identifier(found) => assert_eq!(
                found, name,
                "{}: expected identifier {name:?}, found {found:?}",
                self.context
            ),
            other => panic!(
                "{}: expected identifier {name:?}, found {}",
                self.context,
                other.node_type()
            ),
        }
        self
    }

    /// Assert a single-child body and check the child
    pub fn single<F>(self, check: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        match self.body() {
            Some(Children::Single(child)) => {
                check(NodeAssertion {
                    node: child,
                    context: format!("{}.single", self.context),
                });
            }
            _ => panic!("{}: expected a single child, found {:?}", self.context, self.node),
        }
        self
    }

    /// Assert a list body (or list-shaped node) with `len` children
    pub fn list(self, len: usize) -> Self {
        let found = match (self.node, self.body()) {
            (Node::Sequence(items) | Node::Alternation(items), _) => items.len(),
            (_, Some(Children::Many(items))) => items.len(),
            _ => panic!("{}: expected a list, found {:?}", self.context, self.node),
        };
        assert_eq!(found, len, "{}: expected {len} children", self.context);
        self
    }

    /// Check the `index`th child, in `AstNode::children` order
    pub fn child<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        let children = self.node.children();
        match children.get(index) {
            Some(&child) => {
                check(NodeAssertion {
                    node: child,
                    context: format!("{}[{index}]", self.context),
                });
            }
            None => panic!(
                "{}: no child {index}, {} children",
                self.context,
                children.len()
            ),
        }
        self
    }

    /// Assert the lazy flag of a repetition or optional
    pub fn lazy(self, expected: bool) -> Self {
        let found = match self.node {
            Node::RepeatZeroOrMore { lazy, .. }
            | Node::RepeatOneOrMore { lazy, .. }
            | Node::Optional { lazy, .. } => *lazy,
            Node::BoundedRepetition(repetition) => repetition.lazy,
            other => panic!("{}: {} has no lazy flag", self.context, other.node_type()),
        };
        assert_eq!(found, expected, "{}: lazy flag", self.context);
        self
    }

    /// Assert the bounds of a bounded repetition
    pub fn counts(self, minimum: u64, maximum: u64) -> Self {
        match self.node {
            Node::BoundedRepetition(repetition) => assert_eq!(
                (repetition.minimum, repetition.maximum),
                (minimum, maximum),
                "{}: repetition bounds",
                self.context
            ),
            other => panic!(
                "{}: expected BoundedRepetition, found {}",
                self.context,
                other.node_type()
            ),
        }
        self
    }

    fn body(&self) -> Option<&'a Children> {
        match self.node {
            Node::Group(body)
            | Node::RepeatZeroOrMore { body, .. }
            | Node::RepeatOneOrMore { body, .. }
            | Node::Optional { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_matches_default_namespace() {
        assert_eq!(with_header(""), TAG_HEADER);
    }

    #[test]
    fn test_read_and_write_rule() {
        let node = read_rule("!group digit");
        assert_node(&node)
            .is(Kind::Group)
            .single(|child| child.identifier("digit"));
        assert_eq!(write_rule(node), " !group\n- digit\n");
    }

    #[test]
    #[should_panic(expected = "expected Token")]
    fn test_kind_mismatch_panics() {
        assert_node(&Node::identifier("a")).is(Kind::Token);
    }
}
