//! Construct registry and field validation
//!
//! Every construct has one entry in a static table: its kind, the short tag used by
//! the tagged notation, a display name, and the set of named fields it accepts in
//! the mapping form (`!minus {minuend: a, subtrahend: b}`). The table is a literal;
//! the by-tag index over it is built once on first use and never mutated.
//!
//! Field names follow the historical schema of the notation (`alt`, `seq`, `group`,
//! `many`, `many1`, `opt`, `times`, `minuend`, `sepby`, ...).

use crate::ebnf::tagged::yaml::{Fields, YamlNode};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// The closed set of constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Identifier,
    Token,
    RegExp,
    Special,
    Comment,
    Empty,
    CharRange,
    CharSet,
    Sequence,
    Alternation,
    Group,
    RepeatZeroOrMore,
    RepeatOneOrMore,
    Optional,
    BoundedRepetition,
    Difference,
    SeparatedBy,
    SeparatedEndBy,
    Between,
}

impl Kind {
    pub const ALL: [Kind; 19] = [
        Kind::Identifier,
        Kind::Token,
        Kind::RegExp,
        Kind::Special,
        Kind::Comment,
        Kind::Empty,
        Kind::CharRange,
        Kind::CharSet,
        Kind::Sequence,
        Kind::Alternation,
        Kind::Group,
        Kind::RepeatZeroOrMore,
        Kind::RepeatOneOrMore,
        Kind::Optional,
        Kind::BoundedRepetition,
        Kind::Difference,
        Kind::SeparatedBy,
        Kind::SeparatedEndBy,
        Kind::Between,
    ];

    pub fn schema(self) -> &'static Schema {
        &SCHEMAS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.schema().name
    }

    pub fn tag(self) -> &'static str {
        self.schema().tag
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a named field may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any node
    Node,
    /// An untagged sequence of nodes
    NodeList,
    /// A node or a list of nodes
    Nodes,
    /// A scalar, read as text
    Text,
    /// A single-character scalar
    Char,
    /// A scalar, or a sequence of single-character scalars
    Chars,
    /// A non-negative integer
    Integer,
    Boolean,
}

impl FieldType {
    fn expected(self) -> &'static str {
        match self {
            FieldType::Node | FieldType::Nodes => "a node",
            FieldType::NodeList => "a sequence of nodes",
            FieldType::Text => "a scalar",
            FieldType::Char => "a single character",
            FieldType::Chars => "a scalar or a sequence of single characters",
            FieldType::Integer => "a non-negative integer",
            FieldType::Boolean => "a boolean",
        }
    }

    fn accepts(self, value: &YamlNode) -> bool {
        match self {
            FieldType::Node | FieldType::Nodes => true,
            FieldType::NodeList => matches!(value, YamlNode::Sequence(_)),
            FieldType::Text => value.is_scalar(),
            FieldType::Char => value.is_single_char(),
            FieldType::Chars => match value {
                YamlNode::Scalar(_) => true,
                YamlNode::Sequence(items) => items.iter().all(YamlNode::is_single_char),
                _ => false,
            },
            FieldType::Integer => value.as_u64().is_some(),
            FieldType::Boolean => value.as_bool().is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

impl Field {
    const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

/// Static description of one construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub kind: Kind,
    /// Short tag, without the leading `!`
    pub tag: &'static str,
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

use FieldType::*;

// Ordered like `Kind`, so `Kind::schema` can index directly.
static SCHEMAS: [Schema; 19] = [
    Schema {
        kind: Kind::Identifier,
        tag: "rule",
        name: "Identifier",
        fields: &[Field::required("rule", Text)],
    },
    Schema {
        kind: Kind::Token,
        tag: "token",
        name: "Token",
        fields: &[Field::required("token", Text)],
    },
    Schema {
        kind: Kind::RegExp,
        tag: "regexp",
        name: "RegExp",
        fields: &[Field::required("regexp", Text)],
    },
    Schema {
        kind: Kind::Special,
        tag: "special",
        name: "Special",
        fields: &[Field::required("special", Text)],
    },
    Schema {
        kind: Kind::Comment,
        tag: "comment",
        name: "Comment",
        fields: &[Field::required("comment", Text)],
    },
    Schema {
        kind: Kind::Empty,
        tag: "empty",
        name: "Empty",
        fields: &[Field::required("empty", Text)],
    },
    Schema {
        kind: Kind::CharRange,
        tag: "charrange",
        name: "CharRange",
        fields: &[Field::required("first", Char), Field::required("last", Char)],
    },
    Schema {
        kind: Kind::CharSet,
        tag: "charset",
        name: "CharSet",
        fields: &[
            Field::required("chars", Chars),
            Field::optional("negative", Boolean),
        ],
    },
    Schema {
        kind: Kind::Sequence,
        tag: "seq",
        name: "Sequence",
        fields: &[Field::required("seq", NodeList)],
    },
    Schema {
        kind: Kind::Alternation,
        tag: "alt",
        name: "Alternation",
        fields: &[Field::required("alt", NodeList)],
    },
    Schema {
        kind: Kind::Group,
        tag: "group",
        name: "Group",
        fields: &[Field::required("group", Nodes)],
    },
    Schema {
        kind: Kind::RepeatZeroOrMore,
        tag: "many",
        name: "RepeatZeroOrMore",
        fields: &[
            Field::required("many", Nodes),
            Field::optional("lazy", Boolean),
        ],
    },
    Schema {
        kind: Kind::RepeatOneOrMore,
        tag: "many1",
        name: "RepeatOneOrMore",
        fields: &[
            Field::required("many1", Nodes),
            Field::optional("lazy", Boolean),
        ],
    },
    Schema {
        kind: Kind::Optional,
        tag: "opt",
        name: "Optional",
        fields: &[
            Field::required("opt", Nodes),
            Field::optional("lazy", Boolean),
        ],
    },
    Schema {
        kind: Kind::BoundedRepetition,
        tag: "times",
        name: "BoundedRepetition",
        fields: &[
            Field::required("times", Node),
            Field::optional("minimum", Integer),
            Field::optional("maximum", Integer),
            Field::optional("lazy", Boolean),
        ],
    },
    Schema {
        kind: Kind::Difference,
        tag: "minus",
        name: "Difference",
        fields: &[
            Field::required("minuend", Node),
            Field::required("subtrahend", Node),
        ],
    },
    Schema {
        kind: Kind::SeparatedBy,
        tag: "sepby",
        name: "SeparatedBy",
        fields: &[Field::required("item", Node), Field::required("sepby", Node)],
    },
    Schema {
        kind: Kind::SeparatedEndBy,
        tag: "sependby",
        name: "SeparatedEndBy",
        fields: &[
            Field::required("item", Node),
            Field::required("sependby", Node),
        ],
    },
    Schema {
        kind: Kind::Between,
        tag: "between",
        name: "Between",
        fields: &[
            Field::required("open", Node),
            Field::required("between", Node),
            Field::required("close", Node),
        ],
    },
];

static BY_TAG: Lazy<HashMap<&'static str, &'static Schema>> =
    Lazy::new(|| SCHEMAS.iter().map(|schema| (schema.tag, schema)).collect());

/// Look up the construct for a short tag (without the leading `!`).
pub fn schema_for(tag: &str) -> Option<&'static Schema> {
    BY_TAG.get(tag).copied()
}

/// Field-set validation failures
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The mapping names a field the construct does not have
    UnknownField {
        construct: &'static str,
        field: String,
    },
    /// A required field is absent
    MissingField {
        construct: &'static str,
        field: &'static str,
    },
    /// A field holds a value of the wrong kind
    InvalidField {
        construct: &'static str,
        field: &'static str,
        expected: &'static str,
    },
    /// A value is well-typed but not acceptable (empty name, duplicate rule, ...)
    InvalidValue {
        construct: &'static str,
        message: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnknownField { construct, field } => {
                write!(f, "{construct} has no field '{field}'")
            }
            SchemaError::MissingField { construct, field } => {
                write!(f, "{construct} requires field '{field}'")
            }
            SchemaError::InvalidField {
                construct,
                field,
                expected,
            } => write!(f, "{construct} field '{field}' must be {expected}"),
            SchemaError::InvalidValue { construct, message } => {
                write!(f, "invalid {construct}: {message}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Check a named-field mapping against a construct's schema.
///
/// Every key must be a field of the construct, every required field must be
/// present, and each value must be of the field's type. Node-valued fields are
/// only checked for presence; their content is decoded (and checked) afterwards.
pub fn validate(schema: &Schema, fields: &Fields) -> Result<(), SchemaError> {
    for (key, value) in fields.iter() {
        let Some(name) = key.as_text() else {
            return Err(SchemaError::UnknownField {
                construct: schema.name,
                field: key.describe(),
            });
        };
        let field = schema.field(name).ok_or_else(|| SchemaError::UnknownField {
            construct: schema.name,
            field: name.to_string(),
        })?;
        if !field.ty.accepts(value) {
            return Err(SchemaError::InvalidField {
                construct: schema.name,
                field: field.name,
                expected: field.ty.expected(),
            });
        }
    }

    for field in schema.fields.iter().filter(|field| field.required) {
        if fields.get(field.name).is_none() {
            return Err(SchemaError::MissingField {
                construct: schema.name,
                field: field.name,
            });
        }
    }

    Ok(())
}
