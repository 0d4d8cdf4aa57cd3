//! Whole-document scenarios: read, write back, render

use ebnf_core::ebnf::ast::snapshot_from_document;
use ebnf_core::ebnf::formats::FormatRegistry;
use ebnf_core::ebnf::testing::{assert_node, TAG_HEADER};
use ebnf_core::ebnf::schema::Kind;
use ebnf_core::{decode_document, encode_document, render, RenderOptions};

/// ISO 14977 syntax rules, written in the tagged notation
const SYNTAX: &str = "%TAG ! tag:drosoft.org/ebnf,2016:
---
syntax: !many1 syntax rule
syntax rule:
- meta identifier
- !token '='
- definitions list
- !token ';'
definitions list: !sepby [single definition, !token '|']
single definition: !sepby [syntactic term, !token ',']
syntactic term: [syntactic factor, !opt [!token '-', syntactic exception]]
syntactic exception: !minus [syntactic factor, !special recursion]
syntactic factor: [!opt [integer, !token '*'], syntactic primary]
integer: !many1 {many1: !rule digit}
digit: !charrange ['0', '9']
";

#[test]
fn test_group_scenario() {
    let doc = decode_document("%TAG ! ns:\n---\ntop: !group digit").unwrap();

    assert_eq!(doc.rules.len(), 1);
    let top = doc.rules.get("top").unwrap();
    assert_node(top)
        .is(Kind::Group)
        .single(|child| child.identifier("digit"));

    let written = encode_document(&doc).unwrap();
    assert_eq!(written, "%TAG ! ns:\n---\ntop: !group\n- digit\n");

    let rewritten = encode_document(&decode_document(&written).unwrap()).unwrap();
    assert_eq!(rewritten, written);
}

#[test]
fn test_syntax_grammar_round_trip() {
    let doc = decode_document(SYNTAX).unwrap();
    assert_eq!(
        doc.rules.names().collect::<Vec<_>>(),
        vec![
            "syntax",
            "syntax rule",
            "definitions list",
            "single definition",
            "syntactic term",
            "syntactic exception",
            "syntactic factor",
            "integer",
            "digit",
        ]
    );

    let written = encode_document(&doc).unwrap();
    assert!(written.starts_with(TAG_HEADER));
    let again = decode_document(&written).unwrap();
    assert_eq!(again, doc);
    assert_eq!(encode_document(&again).unwrap(), written);
}

#[test]
fn test_syntax_grammar_renders() {
    let doc = decode_document(SYNTAX).unwrap();
    let text = render(&doc.rules, &RenderOptions::default()).unwrap();

    assert!(text.starts_with("\nsyntax\n\t= syntax rule, { syntax rule };\n"));
    assert!(text.contains("\nsyntax rule\n\t= meta identifier, '=', definitions list, ';';\n"));
    assert!(text.contains(
        "\ndefinitions list\n\t= single definition, { '|', single definition };\n"
    ));
    assert!(text.contains("\nsyntactic exception\n\t= syntactic factor - ? recursion ?;\n"));
    assert!(text.contains("\ndigit\n\t= ?/[0-9]/?;\n"));
}

#[test]
fn test_every_default_format_accepts_the_grammar() {
    let doc = decode_document(SYNTAX).unwrap();
    let registry = FormatRegistry::default();
    for format in registry.list_formats() {
        let output = registry.serialize(&doc, &format).unwrap();
        assert!(!output.is_empty(), "{format} produced no output");
    }

    let json = registry.serialize(&doc, "json").unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot["node_type"], "Grammar");
    assert_eq!(
        snapshot["children"].as_array().map(Vec::len),
        Some(snapshot_from_document(&doc).children.len())
    );
}
