//! Tag encoder
//!
//! Every construct has exactly one output shape:
//!
//!     - Identifier, Sequence and RuleTable are written untagged.
//!     - Text constructs (token, regexp, special, comment, empty) are tagged scalars.
//!     - Everything else is a tagged sequence, single children included (`!group [a]`).
//!     - `!times` carries the shortest positional list that reads back to the same
//!       counts: trailing defaults are dropped.
//!     - Lazy repetitions and optionals have no positional slot for the flag and use
//!       the named-field form `{many: [...], lazy: true}`.
//!
//! Whole tables are refused when they nest deeper than the decoder reads
//! ([MAX_NESTING](crate::ebnf::tagged::MAX_NESTING)); single nodes are encoded unchecked.

use crate::ebnf::ast::{Children, Node, RuleTable};
use crate::ebnf::schema::Kind;
use crate::ebnf::tagged::error::TagError;
use crate::ebnf::tagged::yaml::check_nesting;
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

/// Encode a node as its tag (`None` for untagged constructs) and payload.
pub fn encode(node: &Node) -> (Option<&'static str>, Value) {
    let tag = Some(node.kind().tag());
    match node {
        Node::Identifier(name) => (None, Value::String(name.clone())),
        Node::Token(text)
        | Node::RegExp(text)
        | Node::Special(text)
        | Node::Comment(text)
        | Node::Empty(text) => (tag, Value::String(text.clone())),
        Node::CharRange { first, last } => (
            tag,
            Value::Sequence(vec![
                Value::String(first.to_string()),
                Value::String(last.to_string()),
            ]),
        ),
        Node::CharSet(set) => {
            let mut items: Vec<Value> = set
                .chars()
                .iter()
                .map(|c| Value::String(c.to_string()))
                .collect();
            if set.is_negative() {
                items.push(Value::Bool(true));
            }
            (tag, Value::Sequence(items))
        }
        Node::Sequence(items) => (None, encode_list(items)),
        Node::Alternation(items) => (tag, encode_list(items)),
        Node::Group(body) => (tag, encode_children(body)),
        Node::RepeatZeroOrMore { body, lazy }
        | Node::RepeatOneOrMore { body, lazy }
        | Node::Optional { body, lazy } => {
            if *lazy {
                (tag, lazy_fields(node.kind(), body))
            } else {
                (tag, encode_children(body))
            }
        }
        Node::BoundedRepetition(repetition) => {
            let mut items = vec![encode_node(&repetition.target)];
            if repetition.lazy {
                items.push(repetition.minimum.into());
                items.push(repetition.maximum.into());
                items.push(Value::Bool(true));
            } else if repetition.minimum != repetition.maximum {
                items.push(repetition.minimum.into());
                items.push(repetition.maximum.into());
            } else if repetition.maximum != 0 {
                items.push(repetition.maximum.into());
            }
            (tag, Value::Sequence(items))
        }
        Node::Difference {
            minuend,
            subtrahend,
        } => (
            tag,
            Value::Sequence(vec![encode_node(minuend), encode_node(subtrahend)]),
        ),
        Node::SeparatedBy { item, separator } | Node::SeparatedEndBy { item, separator } => (
            tag,
            Value::Sequence(vec![encode_node(item), encode_node(separator)]),
        ),
        Node::Between { open, inner, close } => (
            tag,
            Value::Sequence(vec![
                encode_node(open),
                encode_node(inner),
                encode_node(close),
            ]),
        ),
    }
}

/// Encode a node as a YAML value, tagged when the construct has a tag.
pub fn encode_node(node: &Node) -> Value {
    match encode(node) {
        (Some(tag), value) => Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })),
        (None, value) => value,
    }
}

/// Encode a rule table as an untagged mapping, in table order.
pub fn encode_rule_table(table: &RuleTable) -> Result<Value, TagError> {
    let mut mapping = Mapping::with_capacity(table.len());
    for rule in table {
        mapping.insert(
            Value::String(rule.name.clone()),
            encode_node(&rule.definition),
        );
    }
    let value = Value::Mapping(mapping);
    check_nesting(&value)?;
    Ok(value)
}

fn encode_list(items: &[Node]) -> Value {
    Value::Sequence(items.iter().map(encode_node).collect())
}

fn encode_children(body: &Children) -> Value {
    encode_list(body.as_slice())
}

fn lazy_fields(kind: Kind, body: &Children) -> Value {
    let mut fields = Mapping::new();
    fields.insert(Value::String(kind.tag().to_string()), encode_children(body));
    fields.insert(Value::String("lazy".to_string()), Value::Bool(true));
    Value::Mapping(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::tagged::MAX_NESTING;

    fn yaml(node: &Node) -> String {
        serde_yaml::to_string(&encode_node(node)).unwrap()
    }

    #[test]
    fn test_untagged_constructs() {
        assert_eq!(encode(&Node::identifier("digit")).0, None);
        assert_eq!(encode(&Node::sequence(vec![Node::identifier("a")])).0, None);
    }

    #[test]
    fn test_single_child_is_written_as_list() {
        let (tag, payload) = encode(&Node::group(Node::identifier("digit")));
        assert_eq!(tag, Some("group"));
        assert_eq!(payload, Value::Sequence(vec![Value::String("digit".into())]));
    }

    #[test]
    fn test_times_minimal_list() {
        let target = || Node::identifier("lt");
        let len = |node: &Node| match encode(node).1 {
            Value::Sequence(items) => items.len(),
            _ => 0,
        };
        assert_eq!(len(&Node::bounded(target(), 0, 0)), 1);
        assert_eq!(len(&Node::exactly(target(), 3)), 2);
        assert_eq!(len(&Node::bounded(target(), 3, 5)), 3);
        assert_eq!(len(&Node::bounded(target(), 3, 3).into_lazy()), 4);
    }

    #[test]
    fn test_lazy_repetition_uses_named_fields() {
        let (_, payload) = encode(&Node::optional(Node::identifier("a")).into_lazy());
        let Value::Mapping(fields) = payload else {
            panic!("expected a mapping");
        };
        assert_eq!(fields.get("lazy"), Some(&Value::Bool(true)));
        assert!(fields.get("opt").is_some_and(Value::is_sequence));
    }

    #[test]
    fn test_empty_text_is_quoted() {
        assert_eq!(yaml(&Node::empty("null")), "!empty 'null'\n");
    }

    #[test]
    fn test_rule_table_nesting_limit() {
        let chain = |groups: usize| {
            (0..groups).fold(Node::identifier("a"), |inner, _| Node::group(vec![inner]))
        };
        // the table mapping is one level, every group one more
        let fits = RuleTable::from_rules([("top", chain(MAX_NESTING - 1))]).unwrap();
        assert!(encode_rule_table(&fits).is_ok());

        let deep = RuleTable::from_rules([("top", chain(MAX_NESTING))]).unwrap();
        assert_eq!(
            encode_rule_table(&deep),
            Err(TagError::TooDeep { limit: MAX_NESTING })
        );
    }

    #[test]
    fn test_negative_char_set_appends_flag() {
        let (_, payload) = encode(&Node::char_set(['a', 'b'], true));
        assert_eq!(
            payload,
            Value::Sequence(vec![
                Value::String("a".into()),
                Value::String("b".into()),
                Value::Bool(true)
            ])
        );
    }
}
