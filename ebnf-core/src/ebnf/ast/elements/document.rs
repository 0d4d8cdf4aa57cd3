//! Document, a rule table plus the tag namespace it was declared with

use super::rule_table::RuleTable;

/// A whole grammar document.
///
/// `namespace` is the prefix bound to the primary `!` tag handle by the source's
/// `%TAG` directive. It is `None` for documents built in memory or read without a
/// directive; writers fall back to their default namespace in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub namespace: Option<String>,
    pub rules: RuleTable,
}

impl Document {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            namespace: None,
            rules,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}
