//! Rule table, the root of every grammar
//!
//! An ordered name → definition mapping. Order is significant: it is the order in
//! which rules are encoded and rendered. Names are non-empty and unique within a
//! table; both are checked on insertion. A name index sits next to the ordered list
//! so lookups stay constant-time for large grammars.

use super::node::Node;
use crate::ebnf::schema::SchemaError;
use std::collections::HashMap;

/// One `name = definition ;` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub definition: Node,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
    /// Position of each rule in `rules`
    index: HashMap<String, usize>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, definition)` pairs, in order.
    pub fn from_rules<N, I>(rules: I) -> Result<Self, SchemaError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Node)>,
    {
        let mut table = Self::new();
        for (name, definition) in rules {
            table.insert(name, definition)?;
        }
        Ok(table)
    }

    /// Append a rule. Fails on an empty or already defined name.
    pub fn insert(&mut self, name: impl Into<String>, definition: Node) -> Result<(), SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::InvalidValue {
                construct: "RuleTable",
                message: "rule names must be non-empty".to_string(),
            });
        }
        if self.contains(&name) {
            return Err(SchemaError::InvalidValue {
                construct: "RuleTable",
                message: format!("rule '{name}' is defined more than once"),
            });
        }
        self.index.insert(name.clone(), self.rules.len());
        self.rules.push(Rule { name, definition });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.index
            .get(name)
            .and_then(|&position| self.rules.get(position))
            .map(|rule| &rule.definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
