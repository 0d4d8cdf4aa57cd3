//! AST traits - Common interfaces for uniform node access

use super::elements::{Children, Node};

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn children(&self) -> Vec<&Node>;
}

impl AstNode for Node {
    fn node_type(&self) -> &'static str {
        self.kind().name()
    }

    fn display_label(&self) -> String {
        match self {
            Node::Identifier(name) => name.clone(),
            Node::Token(text) => format!("{text:?}"),
            Node::RegExp(pattern) => pattern.clone(),
            Node::Special(text) | Node::Comment(text) | Node::Empty(text) => text.clone(),
            Node::CharRange { first, last } => format!("{first}..{last}"),
            Node::CharSet(set) => {
                let chars: String = set.chars().iter().collect();
                if set.is_negative() {
                    format!("not {chars}")
                } else {
                    chars
                }
            }
            Node::Sequence(items) | Node::Alternation(items) => count_label(items.len()),
            Node::Group(body)
            | Node::RepeatZeroOrMore { body, .. }
            | Node::RepeatOneOrMore { body, .. }
            | Node::Optional { body, .. } => children_label(body),
            Node::BoundedRepetition(repetition) => {
                if repetition.is_exact() {
                    format!("{} times", repetition.maximum)
                } else {
                    format!("{}..{} times", repetition.minimum, repetition.maximum)
                }
            }
            Node::Difference { .. } => "minuend - subtrahend".to_string(),
            Node::SeparatedBy { .. } | Node::SeparatedEndBy { .. } => "item, separator".to_string(),
            Node::Between { .. } => "open, inner, close".to_string(),
        }
    }

    fn children(&self) -> Vec<&Node> {
        match self {
            Node::Identifier(_)
            | Node::Token(_)
            | Node::RegExp(_)
            | Node::Special(_)
            | Node::Comment(_)
            | Node::Empty(_)
            | Node::CharRange { .. }
            | Node::CharSet(_) => Vec::new(),
            Node::Sequence(items) | Node::Alternation(items) => items.iter().collect(),
            Node::Group(body)
            | Node::RepeatZeroOrMore { body, .. }
            | Node::RepeatOneOrMore { body, .. }
            | Node::Optional { body, .. } => body.iter().collect(),
            Node::BoundedRepetition(repetition) => vec![repetition.target.as_ref()],
            Node::Difference {
                minuend,
                subtrahend,
            } => vec![minuend.as_ref(), subtrahend.as_ref()],
            Node::SeparatedBy { item, separator } | Node::SeparatedEndBy { item, separator } => {
                vec![item.as_ref(), separator.as_ref()]
            }
            Node::Between { open, inner, close } => {
                vec![open.as_ref(), inner.as_ref(), close.as_ref()]
            }
        }
    }
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

fn children_label(children: &Children) -> String {
    match children {
        Children::Single(node) => node.display_label(),
        Children::Many(nodes) => count_label(nodes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Node::identifier("digit").display_label(), "digit");
        assert_eq!(Node::token("l't").display_label(), "\"l't\"");
        assert_eq!(
            Node::sequence(vec![Node::identifier("a"), Node::identifier("b")]).display_label(),
            "2 items"
        );
        assert_eq!(Node::bounded(Node::identifier("a"), 1, 3).display_label(), "1..3 times");
    }

    #[test]
    fn test_children_of_single_and_list() {
        let single = Node::group(Node::identifier("a"));
        assert_eq!(single.children().len(), 1);

        let empty = Node::group(Vec::<Node>::new());
        assert!(empty.children().is_empty());
    }

    #[test]
    fn test_node_type_uses_construct_name() {
        assert_eq!(Node::optional(Node::identifier("a")).node_type(), "Optional");
    }
}
