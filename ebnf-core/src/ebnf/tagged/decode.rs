//! Tag decoder
//!
//! Dispatch is by tag only. Each construct accepts a handful of payload shapes:
//!
//!     - the named-field mapping form (`!minus {minuend: a, subtrahend: b}`), checked
//!       against the construct's schema before anything else
//!     - the positional form, a scalar or a sequence whose meaning depends on the
//!       construct (`!times [x, 2, 3]`, `!charrange ['a', 'z']`)
//!
//! Single-child constructs (group, many, many1, opt) keep whichever shape they were
//! given: a scalar or tagged node becomes `Children::Single`, a sequence (including
//! the empty one) becomes `Children::Many`.
//!
//! Names and terminal text are taken from a scalar exactly as it is written, so
//! `!token 0x10` is the token `0x10` and `!empty ~` is the empty node `~`. Counts and
//! flags use the value YAML resolves the scalar to.

use crate::ebnf::ast::{CharSet, Children, Node, Repetition, RuleTable};
use crate::ebnf::schema::{schema_for, validate, Kind, SchemaError};
use crate::ebnf::tagged::error::TagError;
use crate::ebnf::tagged::yaml::{Fields, YamlNode};
use log::trace;

/// Minuend used when a legacy difference list omits it
const DEFAULT_MINUEND: &str = "anychar";
/// Subtrahend used for the empty legacy difference list
const DEFAULT_SUBTRAHEND: &str = "empty";

/// Decode any node: tagged values dispatch on their tag, untagged sequences are
/// Sequences and untagged scalars are Identifiers.
pub fn decode_node(value: &YamlNode) -> Result<Node, TagError> {
    match value {
        YamlNode::Tagged { tag, value } => decode(tag, value),
        YamlNode::Sequence(items) => Ok(Node::Sequence(decode_list(items)?)),
        YamlNode::Mapping(_) => Err(TagError::UnknownConstruct {
            tag: "untagged mapping".to_string(),
        }),
        YamlNode::Scalar(_) => identifier(value),
    }
}

/// Decode the payload of a node tagged `!{tag}`.
pub fn decode(tag: &str, payload: &YamlNode) -> Result<Node, TagError> {
    let schema = schema_for(tag).ok_or_else(|| TagError::UnknownConstruct {
        tag: tag.to_string(),
    })?;
    trace!("decoding !{tag} from {}", payload.describe());

    match payload {
        YamlNode::Mapping(fields) => {
            validate(schema, fields)?;
            decode_fields(schema.kind, fields)
        }
        _ => decode_positional(schema.kind, payload),
    }
}

/// Decode a document root. Only here does an untagged mapping mean a rule table.
pub fn decode_rule_table(value: &YamlNode) -> Result<RuleTable, TagError> {
    let fields = match value {
        YamlNode::Mapping(fields) => fields,
        _ if value.is_null() => return Ok(RuleTable::new()),
        other => {
            return Err(TagError::arity(
                "RuleTable",
                "a mapping of rule names to definitions",
                other.describe(),
            ))
        }
    };

    let mut table = RuleTable::new();
    for (key, definition) in fields.iter() {
        let name = rule_name(key)?;
        trace!("decoding rule '{name}'");
        table.insert(name, decode_node(definition)?)?;
    }
    Ok(table)
}

fn rule_name(key: &YamlNode) -> Result<String, TagError> {
    match decode_node(key)? {
        Node::Identifier(name) => Ok(name),
        other => Err(SchemaError::InvalidValue {
            construct: "RuleTable",
            message: format!("rule names must be identifiers, found {}", other.kind()),
        }
        .into()),
    }
}

fn decode_positional(kind: Kind, payload: &YamlNode) -> Result<Node, TagError> {
    let name = kind.name();
    match kind {
        Kind::Identifier => identifier(payload),
        Kind::Token => Ok(Node::Token(text(name, payload)?)),
        Kind::RegExp => Ok(Node::RegExp(text(name, payload)?)),
        Kind::Special => Ok(Node::Special(text(name, payload)?)),
        Kind::Comment => Ok(Node::Comment(text(name, payload)?)),
        Kind::Empty => Ok(Node::Empty(text(name, payload)?)),
        Kind::CharRange => {
            let [first, last] = elements::<2>(name, "2 elements", payload)?;
            Ok(Node::CharRange {
                first: character(name, "first", first)?,
                last: character(name, "last", last)?,
            })
        }
        Kind::CharSet => char_set(payload, None),
        Kind::Sequence => Ok(Node::Sequence(node_list(name, payload)?)),
        Kind::Alternation => Ok(Node::Alternation(node_list(name, payload)?)),
        Kind::Group => Ok(Node::Group(children(payload)?)),
        Kind::RepeatZeroOrMore => Ok(Node::RepeatZeroOrMore {
            body: children(payload)?,
            lazy: false,
        }),
        Kind::RepeatOneOrMore => Ok(Node::RepeatOneOrMore {
            body: children(payload)?,
            lazy: false,
        }),
        Kind::Optional => Ok(Node::Optional {
            body: children(payload)?,
            lazy: false,
        }),
        Kind::BoundedRepetition => repetition(payload),
        Kind::Difference => difference(payload),
        Kind::SeparatedBy => {
            let [item, separator] = elements::<2>(name, "2 elements", payload)?;
            Ok(Node::separated_by(decode_node(item)?, decode_node(separator)?))
        }
        Kind::SeparatedEndBy => {
            let [item, separator] = elements::<2>(name, "2 elements", payload)?;
            Ok(Node::separated_end_by(
                decode_node(item)?,
                decode_node(separator)?,
            ))
        }
        Kind::Between => {
            let [open, inner, close] = elements::<3>(name, "3 elements", payload)?;
            Ok(Node::between(
                decode_node(open)?,
                decode_node(inner)?,
                decode_node(close)?,
            ))
        }
    }
}

/// Build a node from an already validated named-field mapping.
fn decode_fields(kind: Kind, fields: &Fields) -> Result<Node, TagError> {
    let name = kind.name();
    let lazy = match fields.get("lazy") {
        Some(value) => boolean(name, "lazy", value)?,
        None => false,
    };

    match kind {
        Kind::Identifier => identifier(field(kind, fields, "rule")?),
        Kind::Token => Ok(Node::Token(text(name, field(kind, fields, "token")?)?)),
        Kind::RegExp => Ok(Node::RegExp(text(name, field(kind, fields, "regexp")?)?)),
        Kind::Special => Ok(Node::Special(text(name, field(kind, fields, "special")?)?)),
        Kind::Comment => Ok(Node::Comment(text(name, field(kind, fields, "comment")?)?)),
        Kind::Empty => Ok(Node::Empty(text(name, field(kind, fields, "empty")?)?)),
        Kind::CharRange => Ok(Node::CharRange {
            first: character(name, "first", field(kind, fields, "first")?)?,
            last: character(name, "last", field(kind, fields, "last")?)?,
        }),
        Kind::CharSet => {
            let negative = match fields.get("negative") {
                Some(value) => boolean(name, "negative", value)?,
                None => false,
            };
            char_set(field(kind, fields, "chars")?, Some(negative))
        }
        Kind::Sequence => Ok(Node::Sequence(node_list(name, field(kind, fields, "seq")?)?)),
        Kind::Alternation => Ok(Node::Alternation(node_list(
            name,
            field(kind, fields, "alt")?,
        )?)),
        Kind::Group => Ok(Node::Group(children(field(kind, fields, "group")?)?)),
        Kind::RepeatZeroOrMore => Ok(Node::RepeatZeroOrMore {
            body: children(field(kind, fields, "many")?)?,
            lazy,
        }),
        Kind::RepeatOneOrMore => Ok(Node::RepeatOneOrMore {
            body: children(field(kind, fields, "many1")?)?,
            lazy,
        }),
        Kind::Optional => Ok(Node::Optional {
            body: children(field(kind, fields, "opt")?)?,
            lazy,
        }),
        Kind::BoundedRepetition => {
            let target = decode_node(field(kind, fields, "times")?)?;
            let minimum = match fields.get("minimum") {
                Some(value) => integer(name, "minimum", value)?,
                None => 0,
            };
            let maximum = match fields.get("maximum") {
                Some(value) => integer(name, "maximum", value)?,
                None => minimum,
            };
            Ok(Node::BoundedRepetition(
                Repetition::bounded(target, minimum, maximum).with_lazy(lazy),
            ))
        }
        Kind::Difference => Ok(Node::difference(
            decode_node(field(kind, fields, "minuend")?)?,
            decode_node(field(kind, fields, "subtrahend")?)?,
        )),
        Kind::SeparatedBy => Ok(Node::separated_by(
            decode_node(field(kind, fields, "item")?)?,
            decode_node(field(kind, fields, "sepby")?)?,
        )),
        Kind::SeparatedEndBy => Ok(Node::separated_end_by(
            decode_node(field(kind, fields, "item")?)?,
            decode_node(field(kind, fields, "sependby")?)?,
        )),
        Kind::Between => Ok(Node::between(
            decode_node(field(kind, fields, "open")?)?,
            decode_node(field(kind, fields, "between")?)?,
            decode_node(field(kind, fields, "close")?)?,
        )),
    }
}

/// `[target]`, `[target, exact]`, `[target, minimum, maximum]` or
/// `[target, minimum, maximum, lazy]`
fn repetition(payload: &YamlNode) -> Result<Node, TagError> {
    const NAME: &str = "BoundedRepetition";
    const EXPECTED: &str = "a sequence of 1 to 4 elements";

    let items = match payload {
        YamlNode::Sequence(items) if (1..=4).contains(&items.len()) => items,
        other => return Err(TagError::arity(NAME, EXPECTED, other.describe())),
    };

    let target = decode_node(&items[0])?;
    let (minimum, maximum) = match items.len() {
        1 => (0, 0),
        2 => {
            let count = integer(NAME, "maximum", &items[1])?;
            (count, count)
        }
        _ => (
            integer(NAME, "minimum", &items[1])?,
            integer(NAME, "maximum", &items[2])?,
        ),
    };
    let lazy = match items.get(3) {
        Some(value) => boolean(NAME, "lazy", value)?,
        None => false,
    };

    Ok(Node::BoundedRepetition(
        Repetition::bounded(target, minimum, maximum).with_lazy(lazy),
    ))
}

/// `[minuend, subtrahend]`, plus the legacy short forms `[subtrahend]` and `[]`
fn difference(payload: &YamlNode) -> Result<Node, TagError> {
    let items = match payload {
        YamlNode::Sequence(items) => items,
        other => {
            return Err(TagError::arity(
                "Difference",
                "a sequence of 0 to 2 elements",
                other.describe(),
            ))
        }
    };

    match items.as_slice() {
        [] => Ok(Node::difference(
            Node::identifier(DEFAULT_MINUEND),
            Node::identifier(DEFAULT_SUBTRAHEND),
        )),
        [subtrahend] => Ok(Node::difference(
            Node::identifier(DEFAULT_MINUEND),
            decode_node(subtrahend)?,
        )),
        [minuend, subtrahend] => Ok(Node::difference(
            decode_node(minuend)?,
            decode_node(subtrahend)?,
        )),
        _ => Err(TagError::arity(
            "Difference",
            "a sequence of 0 to 2 elements",
            payload.describe(),
        )),
    }
}

/// A scalar of characters, or a sequence of single characters optionally ending in
/// the negative flag. `negative` is set when the flag came from a named field.
fn char_set(payload: &YamlNode, negative: Option<bool>) -> Result<Node, TagError> {
    const NAME: &str = "CharSet";

    match payload {
        YamlNode::Scalar(chars) => Ok(Node::CharSet(CharSet::new(
            chars.text().chars(),
            negative.unwrap_or(false),
        ))),
        YamlNode::Sequence(items) => {
            let trailing_flag = items.last().and_then(YamlNode::as_bool);
            let (items, flag) = match (negative, trailing_flag) {
                (None, Some(flag)) => (&items[..items.len() - 1], flag),
                _ => (items.as_slice(), negative.unwrap_or(false)),
            };
            let chars = items
                .iter()
                .map(|item| character(NAME, "chars", item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::CharSet(CharSet::new(chars, flag)))
        }
        other => Err(TagError::arity(
            NAME,
            "a scalar or a sequence of single characters",
            other.describe(),
        )),
    }
}

fn children(payload: &YamlNode) -> Result<Children, TagError> {
    match payload {
        YamlNode::Sequence(items) => Ok(Children::Many(decode_list(items)?)),
        other => Ok(Children::single(decode_node(other)?)),
    }
}

fn node_list(construct: &'static str, payload: &YamlNode) -> Result<Vec<Node>, TagError> {
    match payload {
        YamlNode::Sequence(items) => decode_list(items),
        other => Err(TagError::arity(construct, "a sequence", other.describe())),
    }
}

fn decode_list(items: &[YamlNode]) -> Result<Vec<Node>, TagError> {
    items.iter().map(decode_node).collect()
}

fn elements<'a, const N: usize>(
    construct: &'static str,
    expected: &'static str,
    payload: &'a YamlNode,
) -> Result<[&'a YamlNode; N], TagError> {
    let found = || TagError::arity(construct, expected, payload.describe());
    match payload {
        YamlNode::Sequence(items) if items.len() == N => {
            let refs: Vec<&YamlNode> = items.iter().collect();
            refs.try_into().map_err(|_| found())
        }
        _ => Err(found()),
    }
}

fn field<'a>(
    kind: Kind,
    fields: &'a Fields,
    name: &'static str,
) -> Result<&'a YamlNode, TagError> {
    fields.get(name).ok_or_else(|| {
        SchemaError::MissingField {
            construct: kind.name(),
            field: name,
        }
        .into()
    })
}

/// A rule reference. Null scalars (`~`, `null`, nothing) name no rule.
fn identifier(value: &YamlNode) -> Result<Node, TagError> {
    match value.as_text() {
        Some(name) if !name.is_empty() && !value.is_null() => {
            Ok(Node::Identifier(name.to_string()))
        }
        Some(_) => Err(SchemaError::InvalidValue {
            construct: "Identifier",
            message: "rule references must be non-empty".to_string(),
        }
        .into()),
        None => Err(TagError::arity("Identifier", "a scalar", value.describe())),
    }
}

fn text(construct: &'static str, value: &YamlNode) -> Result<String, TagError> {
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| TagError::arity(construct, "a scalar", value.describe()))
}

fn character(
    construct: &'static str,
    field: &'static str,
    value: &YamlNode,
) -> Result<char, TagError> {
    let invalid = || {
        TagError::Schema(SchemaError::InvalidField {
            construct,
            field,
            expected: "a single character",
        })
    };
    if !value.is_single_char() {
        return Err(invalid());
    }
    value
        .as_text()
        .and_then(|text| text.chars().next())
        .ok_or_else(invalid)
}

fn integer(construct: &'static str, field: &'static str, value: &YamlNode) -> Result<u64, TagError> {
    value.as_u64().ok_or_else(|| {
        SchemaError::InvalidField {
            construct,
            field,
            expected: "a non-negative integer",
        }
        .into()
    })
}

fn boolean(construct: &'static str, field: &'static str, value: &YamlNode) -> Result<bool, TagError> {
    value.as_bool().ok_or_else(|| {
        SchemaError::InvalidField {
            construct,
            field,
            expected: "a boolean",
        }
        .into()
    })
}
