//! Whole-document reading and writing
//!
//! A document is an optional directive block followed by a YAML body:
//!
//! ```text
//! %TAG ! tag:drosoft.org/ebnf,2016:
//! ---
//! top: !group digit
//! ```
//!
//! The `%TAG !` directive binds the primary handle to the grammar namespace. Tags are
//! resolved by their short name, so the directive block is consumed here and only the
//! body reaches the YAML parser. The namespace is kept on the [Document] so it can be
//! written back unchanged.

use super::decode::decode_rule_table;
use super::encode::encode_rule_table;
use super::error::TagError;
use super::yaml::YamlNode;
use crate::ebnf::ast::Document;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace written when a document does not carry its own
pub const DEFAULT_NAMESPACE: &str = "tag:drosoft.org/ebnf,2016:";

static TAG_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%TAG\s+(!|!!|![0-9A-Za-z-]+!)\s+(\S+)\s*$").unwrap());
static YAML_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%YAML\s+\d+\.\d+\s*$").unwrap());

/// Split the directive block off the top of a document.
///
/// Returns the namespace bound to `!` (if any) and the remaining text, which starts at
/// the `---` marker when directives were present.
fn split_directives(text: &str) -> Result<(Option<String>, &str), TagError> {
    let mut namespace = None;
    let mut saw_directive = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed.starts_with('%') {
            if let Some(caps) = TAG_DIRECTIVE.captures(trimmed) {
                if &caps[1] == "!" {
                    if namespace.is_some() {
                        return Err(TagError::Directive(
                            "the '!' handle is declared more than once".to_string(),
                        ));
                    }
                    namespace = Some(caps[2].to_string());
                }
            } else if !YAML_DIRECTIVE.is_match(trimmed) {
                return Err(TagError::Directive(format!(
                    "unsupported directive '{trimmed}'"
                )));
            }
            saw_directive = true;
        } else if trimmed.is_empty() || trimmed.starts_with('#') {
            // blank lines and comments may precede the marker
        } else if is_document_marker(trimmed) {
            return Ok((namespace, &text[offset..]));
        } else if saw_directive {
            return Err(TagError::Directive(
                "directives must be followed by '---'".to_string(),
            ));
        } else {
            return Ok((None, &text[offset..]));
        }
        offset += line.len();
    }

    if saw_directive {
        return Err(TagError::Directive(
            "directives must be followed by '---'".to_string(),
        ));
    }
    Ok((None, &text[offset..]))
}

fn is_document_marker(line: &str) -> bool {
    line == "---" || line.starts_with("--- ") || line.starts_with("---\t")
}

/// Read a tagged-node document into a [Document].
pub fn decode_document(text: &str) -> Result<Document, TagError> {
    let (namespace, body) = split_directives(text)?;
    debug!(
        "decoding document (namespace: {})",
        namespace.as_deref().unwrap_or("none")
    );

    let value = YamlNode::parse(body)?;
    let rules = decode_rule_table(&value)?;
    debug!("decoded {} rules", rules.len());

    Ok(Document { namespace, rules })
}

/// Write a document in canonical form, using its own namespace or the default one.
pub fn encode_document(doc: &Document) -> Result<String, TagError> {
    encode_document_with_default(doc, DEFAULT_NAMESPACE)
}

/// Write a document in canonical form; `namespace` is used when the document has none.
pub fn encode_document_with_default(doc: &Document, namespace: &str) -> Result<String, TagError> {
    let namespace = doc.namespace.as_deref().unwrap_or(namespace);
    debug!("encoding {} rules (namespace: {namespace})", doc.rules.len());

    let value = encode_rule_table(&doc.rules)?;
    let body = serde_yaml::to_string(&value)?;
    Ok(format!("%TAG ! {namespace}\n---\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::ast::{Children, Node};

    #[test]
    fn test_namespace_is_captured() {
        let doc = decode_document("%TAG ! ns:\n---\ntop: !group digit").unwrap();
        assert_eq!(doc.namespace.as_deref(), Some("ns:"));
        assert_eq!(
            doc.rules.get("top"),
            Some(&Node::Group(Children::single(Node::identifier("digit"))))
        );
    }

    #[test]
    fn test_documents_without_directives() {
        let doc = decode_document("top: digit\n").unwrap();
        assert_eq!(doc.namespace, None);
        assert_eq!(doc.rules.len(), 1);

        let doc = decode_document("---\ntop: digit\n").unwrap();
        assert_eq!(doc.rules.len(), 1);
    }

    #[test]
    fn test_yaml_directive_is_accepted() {
        let doc = decode_document("%YAML 1.1\n%TAG ! ns:\n---\ntop: digit\n").unwrap();
        assert_eq!(doc.namespace.as_deref(), Some("ns:"));
    }

    #[test]
    fn test_directive_errors() {
        assert!(matches!(
            decode_document("%TAG ! ns:\ntop: digit\n"),
            Err(TagError::Directive(_))
        ));
        assert!(matches!(
            decode_document("%FOO bar\n---\ntop: digit\n"),
            Err(TagError::Directive(_))
        ));
    }

    #[test]
    fn test_encode_writes_header() {
        let doc = decode_document("%TAG ! ns:\n---\ntop: !group digit").unwrap();
        assert_eq!(
            encode_document(&doc).unwrap(),
            "%TAG ! ns:\n---\ntop: !group\n- digit\n"
        );
    }

    #[test]
    fn test_encode_uses_default_namespace() {
        let doc = decode_document("top: digit\n").unwrap();
        let text = encode_document(&doc).unwrap();
        assert!(text.starts_with("%TAG ! tag:drosoft.org/ebnf,2016:\n---\n"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            decode_document("top: [unclosed\n"),
            Err(TagError::Yaml(_))
        ));
    }
}
