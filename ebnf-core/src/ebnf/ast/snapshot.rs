//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! The snapshot captures the complete tree with node types, labels, attributes and
//! children, so each inspection format (treeviz, json) only deals with presentation
//! and never reimplements traversal.
//!
//! All serializers should consume `snapshot_from_document()` or `snapshot_from_node()`.

use super::elements::{Document, Node};
use super::traits::AstNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Grammar", "Rule", "Sequence")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    /// Additional attributes specific to the node type
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: String, label: String) -> Self {
        Self {
            node_type,
            label,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: String, value: String) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Snapshot of a whole document: a `Grammar` root with one `Rule` child per rule
pub fn snapshot_from_document(doc: &Document) -> AstSnapshot {
    let label = match doc.rules.len() {
        1 => "1 rule".to_string(),
        n => format!("{n} rules"),
    };
    let mut root = AstSnapshot::new("Grammar".to_string(), label);
    if let Some(namespace) = &doc.namespace {
        root = root.with_attribute("namespace".to_string(), namespace.clone());
    }

    let rules = doc
        .rules
        .iter()
        .map(|rule| {
            AstSnapshot::new("Rule".to_string(), rule.name.clone())
                .with_child(snapshot_from_node(&rule.definition))
        })
        .collect();
    root.with_children(rules)
}

/// Snapshot of a node and all its descendants
pub fn snapshot_from_node(node: &Node) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new(node.node_type().to_string(), node.display_label());

    for (key, value) in attributes(node) {
        snapshot = snapshot.with_attribute(key.to_string(), value);
    }

    let children = node.children().into_iter().map(snapshot_from_node).collect();
    snapshot.with_children(children)
}

fn attributes(node: &Node) -> Vec<(&'static str, String)> {
    match node {
        Node::RepeatZeroOrMore { body, lazy }
        | Node::RepeatOneOrMore { body, lazy }
        | Node::Optional { body, lazy } => {
            let mut attrs = vec![(
                "shape",
                if body.is_single() { "single" } else { "list" }.to_string(),
            )];
            if *lazy {
                attrs.push(("lazy", "true".to_string()));
            }
            attrs
        }
        Node::Group(body) => vec![(
            "shape",
            if body.is_single() { "single" } else { "list" }.to_string(),
        )],
        Node::BoundedRepetition(repetition) => {
            let mut attrs = vec![
                ("minimum", repetition.minimum.to_string()),
                ("maximum", repetition.maximum.to_string()),
            ];
            if repetition.lazy {
                attrs.push(("lazy", "true".to_string()));
            }
            attrs
        }
        Node::CharSet(set) if set.is_negative() => vec![("negative", "true".to_string())],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::ast::RuleTable;

    #[test]
    fn test_document_snapshot_has_one_child_per_rule() {
        let rules = RuleTable::from_rules([
            ("top", Node::group(Node::identifier("digit"))),
            ("digit", Node::char_range('0', '9')),
        ])
        .unwrap();
        let snapshot = snapshot_from_document(&Document::new(rules));

        assert_eq!(snapshot.node_type, "Grammar");
        assert_eq!(snapshot.label, "2 rules");
        assert_eq!(snapshot.children.len(), 2);
        assert_eq!(snapshot.children[0].label, "top");
        assert_eq!(snapshot.children[0].children[0].node_type, "Group");
        assert_eq!(
            snapshot.children[0].children[0].attributes.get("shape"),
            Some(&"single".to_string())
        );
    }

    #[test]
    fn test_repetition_attributes() {
        let node = Node::bounded(Node::identifier("a"), 2, 4).into_lazy();
        let snapshot = snapshot_from_node(&node);
        assert_eq!(snapshot.attributes["minimum"], "2");
        assert_eq!(snapshot.attributes["maximum"], "4");
        assert_eq!(snapshot.attributes["lazy"], "true");
        assert_eq!(snapshot.children.len(), 1);
    }
}
