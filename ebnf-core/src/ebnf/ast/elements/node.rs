//! The node enum
//!
//! Every construct of the grammar model is one variant of [Node]. Leaf variants
//! carry their text as read, composites own their children.
//!
//! | Variant            | EBNF                 | Tag           |
//! |--------------------|----------------------|---------------|
//! | Identifier         | `name`               | (untagged)    |
//! | Token              | `'text'`             | `!token`      |
//! | RegExp             | `?/pattern/?`        | `!regexp`     |
//! | Special            | `? text ?`           | `!special`    |
//! | Comment            | `(* text *)`         | `!comment`    |
//! | Empty              | (nothing)            | `!empty`      |
//! | CharRange          | `?/[a-z]/?`          | `!charrange`  |
//! | CharSet            | `?/[abc]/?`          | `!charset`    |
//! | Sequence           | `a, b`               | (untagged)    |
//! | Alternation        | `a \| b`             | `!alt`        |
//! | Group              | `( a )`              | `!group`      |
//! | RepeatZeroOrMore   | `{ a }`              | `!many`       |
//! | RepeatOneOrMore    | `a, { a }`           | `!many1`      |
//! | Optional           | `[ a ]`              | `!opt`        |
//! | BoundedRepetition  | `3 * a`              | `!times`      |
//! | Difference         | `a - b`              | `!minus`      |
//! | SeparatedBy        | `a, { s, a }`        | `!sepby`      |
//! | SeparatedEndBy     | `a, { s, a }, [ s ]` | `!sependby`   |
//! | Between            | `o, a, c`            | `!between`    |

use super::charset::CharSet;
use super::children::Children;
use super::repetition::Repetition;
use crate::ebnf::schema::Kind;

/// A node of the grammar tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Reference to another rule by name
    Identifier(String),
    /// Terminal string
    Token(String),
    /// Regular expression pattern, with or without its `/` delimiters
    RegExp(String),
    /// Special sequence, passed through verbatim
    Special(String),
    /// Comment text, no grammar semantics
    Comment(String),
    /// Empty sequence; keeps the literal scalar it was read from
    Empty(String),
    CharRange {
        first: char,
        last: char,
    },
    CharSet(CharSet),
    Sequence(Vec<Node>),
    Alternation(Vec<Node>),
    Group(Children),
    RepeatZeroOrMore {
        body: Children,
        lazy: bool,
    },
    RepeatOneOrMore {
        body: Children,
        lazy: bool,
    },
    Optional {
        body: Children,
        lazy: bool,
    },
    BoundedRepetition(Repetition),
    Difference {
        minuend: Box<Node>,
        subtrahend: Box<Node>,
    },
    SeparatedBy {
        item: Box<Node>,
        separator: Box<Node>,
    },
    SeparatedEndBy {
        item: Box<Node>,
        separator: Box<Node>,
    },
    Between {
        open: Box<Node>,
        inner: Box<Node>,
        close: Box<Node>,
    },
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn token(text: impl Into<String>) -> Self {
        Node::Token(text.into())
    }

    pub fn regexp(pattern: impl Into<String>) -> Self {
        Node::RegExp(pattern.into())
    }

    pub fn special(text: impl Into<String>) -> Self {
        Node::Special(text.into())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment(text.into())
    }

    pub fn empty(literal: impl Into<String>) -> Self {
        Node::Empty(literal.into())
    }

    pub fn char_range(first: char, last: char) -> Self {
        Node::CharRange { first, last }
    }

    pub fn char_set(chars: impl IntoIterator<Item = char>, negative: bool) -> Self {
        Node::CharSet(CharSet::new(chars, negative))
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }

    pub fn alternation(items: Vec<Node>) -> Self {
        Node::Alternation(items)
    }

    pub fn group(body: impl Into<Children>) -> Self {
        Node::Group(body.into())
    }

    pub fn repeat_zero_or_more(body: impl Into<Children>) -> Self {
        Node::RepeatZeroOrMore {
            body: body.into(),
            lazy: false,
        }
    }

    pub fn repeat_one_or_more(body: impl Into<Children>) -> Self {
        Node::RepeatOneOrMore {
            body: body.into(),
            lazy: false,
        }
    }

    pub fn optional(body: impl Into<Children>) -> Self {
        Node::Optional {
            body: body.into(),
            lazy: false,
        }
    }

    /// `count * target`
    pub fn exactly(target: Node, count: u64) -> Self {
        Node::BoundedRepetition(Repetition::exact(target, count))
    }

    pub fn bounded(target: Node, minimum: u64, maximum: u64) -> Self {
        Node::BoundedRepetition(Repetition::bounded(target, minimum, maximum))
    }

    pub fn difference(minuend: Node, subtrahend: Node) -> Self {
        Node::Difference {
            minuend: Box::new(minuend),
            subtrahend: Box::new(subtrahend),
        }
    }

    pub fn separated_by(item: Node, separator: Node) -> Self {
        Node::SeparatedBy {
            item: Box::new(item),
            separator: Box::new(separator),
        }
    }

    pub fn separated_end_by(item: Node, separator: Node) -> Self {
        Node::SeparatedEndBy {
            item: Box::new(item),
            separator: Box::new(separator),
        }
    }

    pub fn between(open: Node, inner: Node, close: Node) -> Self {
        Node::Between {
            open: Box::new(open),
            inner: Box::new(inner),
            close: Box::new(close),
        }
    }

    /// Mark a repetition or optional as lazy. Other variants are returned unchanged.
    pub fn into_lazy(self) -> Self {
        match self {
            Node::RepeatZeroOrMore { body, .. } => Node::RepeatZeroOrMore { body, lazy: true },
            Node::RepeatOneOrMore { body, .. } => Node::RepeatOneOrMore { body, lazy: true },
            Node::Optional { body, .. } => Node::Optional { body, lazy: true },
            Node::BoundedRepetition(repetition) => {
                Node::BoundedRepetition(repetition.with_lazy(true))
            }
            other => other,
        }
    }

    /// The construct this node is an instance of
    pub fn kind(&self) -> Kind {
        match self {
            Node::Identifier(_) => Kind::Identifier,
            Node::Token(_) => Kind::Token,
            Node::RegExp(_) => Kind::RegExp,
            Node::Special(_) => Kind::Special,
            Node::Comment(_) => Kind::Comment,
            Node::Empty(_) => Kind::Empty,
            Node::CharRange { .. } => Kind::CharRange,
            Node::CharSet(_) => Kind::CharSet,
            Node::Sequence(_) => Kind::Sequence,
            Node::Alternation(_) => Kind::Alternation,
            Node::Group(_) => Kind::Group,
            Node::RepeatZeroOrMore { .. } => Kind::RepeatZeroOrMore,
            Node::RepeatOneOrMore { .. } => Kind::RepeatOneOrMore,
            Node::Optional { .. } => Kind::Optional,
            Node::BoundedRepetition(_) => Kind::BoundedRepetition,
            Node::Difference { .. } => Kind::Difference,
            Node::SeparatedBy { .. } => Kind::SeparatedBy,
            Node::SeparatedEndBy { .. } => Kind::SeparatedEndBy,
            Node::Between { .. } => Kind::Between,
        }
    }

    /// Expand the sugar constructs into the core ones they abbreviate.
    ///
    /// - `sepby(a, s)`    → `a, { s, a }`
    /// - `sependby(a, s)` → `a, { s, a }, [ s ]`
    /// - `between(o, a, c)` → `o, a, c`
    ///
    /// Returns `None` for every other variant.
    pub fn desugar(&self) -> Option<Node> {
        match self {
            Node::SeparatedBy { item, separator } => Some(Node::Sequence(vec![
                (**item).clone(),
                Node::repeat_zero_or_more(Node::Sequence(vec![
                    (**separator).clone(),
                    (**item).clone(),
                ])),
            ])),
            Node::SeparatedEndBy { item, separator } => Some(Node::Sequence(vec![
                (**item).clone(),
                Node::repeat_zero_or_more(Node::Sequence(vec![
                    (**separator).clone(),
                    (**item).clone(),
                ])),
                Node::optional((**separator).clone()),
            ])),
            Node::Between { open, inner, close } => Some(Node::Sequence(vec![
                (**open).clone(),
                (**inner).clone(),
                (**close).clone(),
            ])),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(name: &str) -> Self {
        Node::identifier(name)
    }
}
