//! YAML nodes with scalars kept as written
//!
//! serde_yaml resolves plain scalars while it parses: `0x10` comes back as 16, `~` as
//! null and `1e3` as 1000.0. Grammar text has to survive verbatim, so a body is read
//! twice. The first pass yields the resolved [Value], which fixes the shape of every
//! node. The second pass walks the same text guided by that shape and reads each
//! scalar with `deserialize_str`, which hands back its source text. A [Scalar] keeps
//! both: the text for names and terminals, the resolved value for counts and flags.
//!
//! Both directions share one nesting limit, [MAX_NESTING], counted in YAML sequences
//! and mappings. Anything the encoder writes, the decoder reads back.

use super::error::TagError;
use serde::de::{self, DeserializeSeed, Deserializer, EnumAccess, IgnoredAny, MapAccess};
use serde::de::{SeqAccess, VariantAccess, Visitor};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Deepest sequence/mapping nesting accepted in a document body.
///
/// serde_yaml refuses to parse past 128 levels; staying below keeps every written
/// document readable.
pub const MAX_NESTING: usize = 120;

/// A parsed YAML node
#[derive(Debug, Clone, PartialEq)]
pub enum YamlNode {
    Scalar(Scalar),
    Sequence(Vec<YamlNode>),
    Mapping(Fields),
    /// A node with an explicit tag, stored without its leading `!`
    Tagged { tag: String, value: Box<YamlNode> },
}

/// A scalar's source text next to the value YAML resolves it to
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    text: String,
    resolved: Value,
}

impl Scalar {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn resolved(&self) -> &Value {
        &self.resolved
    }
}

/// Mapping entries in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(YamlNode, YamlNode)>);

impl Fields {
    /// The value under a scalar key spelled `name`
    pub fn get(&self, name: &str) -> Option<&YamlNode> {
        self.0
            .iter()
            .find(|(key, _)| key.as_text() == Some(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&YamlNode, &YamlNode)> {
        self.0.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl YamlNode {
    /// Parse a single YAML document body.
    ///
    /// A body that is null as a whole (empty, or only `~`) is a null scalar with no
    /// text.
    pub fn parse(text: &str) -> Result<YamlNode, TagError> {
        let shape: Value = serde_yaml::from_str(text)?;
        check_nesting(&shape)?;
        if shape.is_null() {
            return Ok(YamlNode::Scalar(Scalar {
                text: String::new(),
                resolved: Value::Null,
            }));
        }
        Ok(Shaped(&shape).deserialize(serde_yaml::Deserializer::from_str(text))?)
    }

    /// Source text of a scalar
    pub fn as_text(&self) -> Option<&str> {
        match self {
            YamlNode::Scalar(scalar) => Some(scalar.text()),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            YamlNode::Scalar(scalar) => scalar.resolved.as_u64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            YamlNode::Scalar(scalar) => scalar.resolved.as_bool(),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, YamlNode::Scalar(_))
    }

    /// A scalar YAML resolves to null (`~`, `null`, or nothing at all)
    pub fn is_null(&self) -> bool {
        matches!(self, YamlNode::Scalar(scalar) if scalar.resolved.is_null())
    }

    pub fn is_single_char(&self) -> bool {
        self.as_text().is_some_and(|text| text.chars().count() == 1)
    }

    /// Short description of the node's shape, for error messages
    pub fn describe(&self) -> String {
        match self {
            YamlNode::Scalar(_) if self.is_null() => "null".to_string(),
            YamlNode::Scalar(_) => "a scalar".to_string(),
            YamlNode::Sequence(items) if items.len() == 1 => "1 element".to_string(),
            YamlNode::Sequence(items) => format!("{} elements", items.len()),
            YamlNode::Mapping(_) => "a mapping".to_string(),
            YamlNode::Tagged { tag, .. } => format!("a node tagged !{tag}"),
        }
    }
}

/// Sequence and mapping levels in `value`; tags add none
pub fn nesting(value: &Value) -> usize {
    match value {
        Value::Sequence(items) => 1 + items.iter().map(nesting).max().unwrap_or(0),
        Value::Mapping(mapping) => {
            1 + mapping
                .iter()
                .map(|(key, value)| nesting(key).max(nesting(value)))
                .max()
                .unwrap_or(0)
        }
        Value::Tagged(tagged) => nesting(&tagged.value),
        _ => 0,
    }
}

pub(crate) fn check_nesting(value: &Value) -> Result<(), TagError> {
    if nesting(value) > MAX_NESTING {
        return Err(TagError::TooDeep { limit: MAX_NESTING });
    }
    Ok(())
}

/// Reads one node whose shape is already known from the first pass
struct Shaped<'v>(&'v Value);

impl<'de> DeserializeSeed<'de> for Shaped<'_> {
    type Value = YamlNode;

    fn deserialize<D>(self, deserializer: D) -> Result<YamlNode, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.0 {
            Value::Tagged(tagged) => deserializer.deserialize_any(TaggedVisitor(tagged)),
            Value::Sequence(items) => deserializer.deserialize_seq(SequenceVisitor(items)),
            Value::Mapping(mapping) => deserializer.deserialize_map(MappingVisitor(mapping)),
            resolved => deserializer.deserialize_str(ScalarVisitor(resolved)),
        }
    }
}

struct TaggedVisitor<'v>(&'v TaggedValue);

impl<'de> Visitor<'de> for TaggedVisitor<'_> {
    type Value = YamlNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a node tagged {}", self.0.tag)
    }

    // serde_yaml presents a tagged node as an enum whose variant is the tag
    fn visit_enum<A>(self, data: A) -> Result<YamlNode, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
        let value = variant.newtype_variant_seed(Shaped(&self.0.value))?;
        let tag = self.0.tag.to_string();
        Ok(YamlNode::Tagged {
            tag: tag.strip_prefix('!').unwrap_or(&tag).to_string(),
            value: Box::new(value),
        })
    }
}

struct SequenceVisitor<'v>(&'v [Value]);

impl<'de> Visitor<'de> for SequenceVisitor<'_> {
    type Value = YamlNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of {} elements", self.0.len())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<YamlNode, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(self.0.len());
        for item in self.0 {
            match seq.next_element_seed(Shaped(item))? {
                Some(node) => items.push(node),
                None => return Err(de::Error::invalid_length(items.len(), &self)),
            }
        }
        Ok(YamlNode::Sequence(items))
    }
}

struct MappingVisitor<'v>(&'v Mapping);

impl<'de> Visitor<'de> for MappingVisitor<'_> {
    type Value = YamlNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a mapping of {} entries", self.0.len())
    }

    fn visit_map<A>(self, mut map: A) -> Result<YamlNode, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(self.0.len());
        for (key, value) in self.0 {
            let Some(key) = map.next_key_seed(Shaped(key))? else {
                return Err(de::Error::invalid_length(entries.len(), &self));
            };
            let value = map.next_value_seed(Shaped(value))?;
            entries.push((key, value));
        }
        Ok(YamlNode::Mapping(Fields(entries)))
    }
}

struct ScalarVisitor<'v>(&'v Value);

impl<'de> Visitor<'de> for ScalarVisitor<'_> {
    type Value = YamlNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar")
    }

    fn visit_str<E>(self, text: &str) -> Result<YamlNode, E>
    where
        E: de::Error,
    {
        Ok(YamlNode::Scalar(Scalar {
            text: text.to_string(),
            resolved: self.0.clone(),
        }))
    }
}
