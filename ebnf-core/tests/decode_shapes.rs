//! Tests for the payload shapes each construct accepts on read
//!
//! Every case reads `top: <body>` through the full document path (directive block
//! included) and checks the resulting tree with the fluent node assertions.

use ebnf_core::ebnf::schema::{Kind, SchemaError};
use ebnf_core::ebnf::tagged::{decode_document, encode_document, TagError, MAX_NESTING};
use ebnf_core::ebnf::testing::{assert_node, read_rule, with_header};
use ebnf_core::{Children, Document, Node, RuleTable};
use rstest::rstest;

fn decode_error(body: &str) -> TagError {
    match decode_document(&with_header(&format!("top: {body}\n"))) {
        Ok(doc) => panic!("expected {body:?} to fail, got {:?}", doc.rules),
        Err(err) => err,
    }
}

#[rstest]
#[case::group("!group", Kind::Group)]
#[case::many("!many", Kind::RepeatZeroOrMore)]
#[case::many1("!many1", Kind::RepeatOneOrMore)]
#[case::opt("!opt", Kind::Optional)]
fn test_single_child_constructs_keep_their_shape(#[case] tag: &str, #[case] kind: Kind) {
    let scalar = read_rule(&format!("{tag} digit"));
    assert_node(&scalar)
        .is(kind)
        .single(|child| child.identifier("digit"));

    let tagged = read_rule(&format!("{tag} {{{}: !token x}}", &tag[1..]));
    assert_node(&tagged)
        .is(kind)
        .single(|child| child.is(Kind::Token));

    let list = read_rule(&format!("{tag} [digit, letter]"));
    assert_node(&list)
        .is(kind)
        .list(2)
        .child(0, |child| child.identifier("digit"))
        .child(1, |child| child.identifier("letter"));

    let empty = read_rule(&format!("{tag} []"));
    assert_node(&empty).is(kind).list(0);
}

#[test]
fn test_single_and_one_element_list_compare_equal() {
    let single = read_rule("!group digit");
    let list = read_rule("!group [digit]");
    assert!(matches!(&single, Node::Group(Children::Single(_))));
    assert!(matches!(&list, Node::Group(Children::Many(_))));
    assert_eq!(single, list);
}

#[rstest]
#[case::target_only("!times [lt]", 0, 0, false)]
#[case::exact("!times [lt, 3]", 3, 3, false)]
#[case::bounded("!times [lt, 3, 5]", 3, 5, false)]
#[case::lazy("!times [lt, 3, 5, true]", 3, 5, true)]
#[case::named("!times {times: lt, minimum: 1, maximum: 2}", 1, 2, false)]
#[case::named_minimum_only("!times {times: lt, minimum: 4}", 4, 4, false)]
fn test_times_shapes(
    #[case] body: &str,
    #[case] minimum: u64,
    #[case] maximum: u64,
    #[case] lazy: bool,
) {
    let node = read_rule(body);
    assert_node(&node)
        .is(Kind::BoundedRepetition)
        .counts(minimum, maximum)
        .lazy(lazy)
        .child(0, |target| target.identifier("lt"));
}

#[rstest]
#[case::empty("!times []")]
#[case::too_long("!times [lt, 1, 2, true, extra]")]
#[case::scalar("!times lt")]
fn test_times_arity_errors(#[case] body: &str) {
    assert!(matches!(decode_error(body), TagError::Arity { .. }));
}

#[test]
fn test_times_counts_must_be_integers() {
    assert!(matches!(
        decode_error("!times [lt, many]"),
        TagError::Schema(SchemaError::InvalidField { .. })
    ));
}

#[rstest]
#[case::empty("!minus []", "anychar", "empty")]
#[case::subtrahend_only("!minus [quote]", "anychar", "quote")]
#[case::both("!minus [character, quote]", "character", "quote")]
#[case::named("!minus {minuend: character, subtrahend: quote}", "character", "quote")]
fn test_difference_shapes(#[case] body: &str, #[case] minuend: &str, #[case] subtrahend: &str) {
    let node = read_rule(body);
    assert_node(&node)
        .is(Kind::Difference)
        .child(0, |child| child.identifier(minuend))
        .child(1, |child| child.identifier(subtrahend));
}

#[rstest]
#[case::null("!empty null", "null")]
#[case::bool_true("!empty true", "true")]
#[case::bool_false("!empty false", "false")]
#[case::quoted("!empty 'null'", "null")]
#[case::text("!empty hello", "hello")]
#[case::number("!empty 3", "3")]
#[case::hex("!empty 0x10", "0x10")]
#[case::octal("!empty 0o17", "0o17")]
#[case::exponent("!empty 1e3", "1e3")]
#[case::signed("!empty +5", "+5")]
#[case::tilde("!empty ~", "~")]
#[case::bare("!empty", "")]
fn test_empty_keeps_its_text(#[case] body: &str, #[case] text: &str) {
    assert_eq!(read_rule(body), Node::empty(text));
}

#[rstest]
#[case::token("!token lt", Node::token("lt"))]
#[case::token_quote("!token \"l't\"", Node::token("l't"))]
#[case::regexp("!regexp '[0-9]+'", Node::regexp("[0-9]+"))]
#[case::special("!special any character", Node::special("any character"))]
#[case::comment("!comment about digits", Node::comment("about digits"))]
#[case::explicit_rule("!rule digit", Node::identifier("digit"))]
#[case::explicit_seq("!seq [a, b]", Node::sequence(vec![Node::identifier("a"), Node::identifier("b")]))]
#[case::char_range("!charrange ['0', '9']", Node::char_range('0', '9'))]
#[case::char_set_string("!charset abca", Node::char_set(['a', 'b', 'c'], false))]
#[case::char_set_negative("!charset [a, b, true]", Node::char_set(['a', 'b'], true))]
#[case::char_set_named("!charset {chars: xy, negative: true}", Node::char_set(['x', 'y'], true))]
#[case::sepby("!sepby [item, !token ',']", Node::separated_by(Node::identifier("item"), Node::token(",")))]
#[case::sependby("!sependby [item, !token ';']", Node::separated_end_by(Node::identifier("item"), Node::token(";")))]
#[case::between(
    "!between [!token '(', expr, !token ')']",
    Node::between(Node::token("("), Node::identifier("expr"), Node::token(")"))
)]
fn test_leaf_and_sugar_shapes(#[case] body: &str, #[case] expected: Node) {
    assert_eq!(read_rule(body), expected);
}

#[rstest]
#[case::token_hex("!token 0x10", Node::token("0x10"))]
#[case::token_octal("!token 0o17", Node::token("0o17"))]
#[case::token_exponent("!token 1e3", Node::token("1e3"))]
#[case::token_signed("!token +5", Node::token("+5"))]
#[case::token_tilde("!token ~", Node::token("~"))]
#[case::token_float("!token 1.50", Node::token("1.50"))]
#[case::regexp_digits("!regexp 007", Node::regexp("007"))]
#[case::special_null("!special Null", Node::special("Null"))]
#[case::comment_bool("!comment TRUE", Node::comment("TRUE"))]
#[case::identifier_hex("0x10", Node::identifier("0x10"))]
#[case::identifier_float("1.0", Node::identifier("1.0"))]
#[case::named_token("!token {token: 0o17}", Node::token("0o17"))]
fn test_scalar_text_is_kept_as_written(#[case] body: &str, #[case] expected: Node) {
    assert_eq!(read_rule(body), expected);
}

#[test]
fn test_kept_text_survives_a_write() {
    let node = read_rule("!alt [!token 0x10, !empty ~, 1e3]");
    let doc = Document::new(RuleTable::from_rules([("top", node.clone())]).unwrap());
    let again = decode_document(&encode_document(&doc).unwrap()).unwrap();
    assert_eq!(again.rules.get("top"), Some(&node));
}

#[rstest]
#[case::null("~")]
#[case::null_word("null")]
fn test_null_identifiers_are_rejected(#[case] body: &str) {
    assert!(matches!(decode_error(body), TagError::Schema(_)));
}

#[test]
fn test_alternation_of_mixed_nodes() {
    let node = read_rule("!alt [digit, !token '-', [sign, digit]]");
    assert_node(&node)
        .is(Kind::Alternation)
        .list(3)
        .child(0, |child| child.identifier("digit"))
        .child(1, |child| child.is(Kind::Token))
        .child(2, |child| child.is(Kind::Sequence).list(2));
}

#[test]
fn test_lazy_named_form() {
    let node = read_rule("!many1 {many1: [digit], lazy: true}");
    assert_node(&node)
        .is(Kind::RepeatOneOrMore)
        .lazy(true)
        .list(1);
}

#[rstest]
#[case::unknown_tag("!bogus x")]
#[case::nested_mapping("{a: b}")]
fn test_unknown_constructs(#[case] body: &str) {
    assert!(matches!(
        decode_error(body),
        TagError::UnknownConstruct { .. }
    ));
}

#[rstest]
#[case::unknown_field("!group {group: a, extra: b}")]
#[case::missing_field("!minus {minuend: a}")]
#[case::bad_lazy("!opt {opt: a, lazy: sometimes}")]
#[case::empty_identifier("''")]
#[case::wide_char_range("!charrange [ab, z]")]
fn test_schema_errors(#[case] body: &str) {
    assert!(matches!(decode_error(body), TagError::Schema(_)));
}

#[rstest]
#[case::char_range_short("!charrange [a]")]
#[case::sepby_short("!sepby [item]")]
#[case::between_short("!between [a, b]")]
#[case::minus_long("!minus [a, b, c]")]
#[case::alt_scalar("!alt a")]
fn test_arity_errors(#[case] body: &str) {
    assert!(matches!(decode_error(body), TagError::Arity { .. }));
}

#[test]
fn test_root_must_be_a_mapping() {
    let err = decode_document(&with_header("- a\n- b\n")).unwrap_err();
    assert!(matches!(err, TagError::Arity { construct: "RuleTable", .. }));
}

/// `top: !group [!group [... [a] ...]]` with `groups` levels of group
fn group_chain_document(groups: usize) -> String {
    with_header(&format!(
        "top: {}a{}\n",
        "!group [".repeat(groups),
        "]".repeat(groups)
    ))
}

#[test]
fn test_nesting_up_to_the_limit_reads_and_writes() {
    // the rule table mapping is one level, every group one more
    let doc = decode_document(&group_chain_document(MAX_NESTING - 1)).unwrap();
    let written = encode_document(&doc).unwrap();
    assert_eq!(decode_document(&written).unwrap(), doc);
}

#[test]
fn test_nesting_past_the_limit_is_refused_both_ways() {
    assert_eq!(
        decode_document(&group_chain_document(MAX_NESTING)),
        Err(TagError::TooDeep { limit: MAX_NESTING })
    );

    let deep = (0..MAX_NESTING).fold(Node::identifier("a"), |inner, _| Node::group(vec![inner]));
    let doc = Document::new(RuleTable::from_rules([("top", deep)]).unwrap());
    assert_eq!(
        encode_document(&doc),
        Err(TagError::TooDeep { limit: MAX_NESTING })
    );
}

#[test]
fn test_duplicate_rule_names_are_rejected() {
    assert!(decode_document(&with_header("top: a\ntop: b\n")).is_err());
}
