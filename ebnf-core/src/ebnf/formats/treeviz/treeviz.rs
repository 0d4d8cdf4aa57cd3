//! Treeviz formatter for grammar trees
//!
//! Treeviz is a one line per node view of the tree, which makes nesting easy to scan.
//! Structure is encoded with box-drawing prefixes, two columns per level:
//!
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//!   ⧉ 2 rules
//!   ├─ ≔ top
//!   │ └─ ( 2 items
//!   │   ├─ ○ digit
//!   │   └─ { digit
//!   │     └─ ○ digit
//!   └─ ≔ digit
//!     └─ ↔ 0..9
//!
//! Icons
//!     Grammar: ⧉      Rule: ≔
//!     Identifier: ○   Token: ‘       RegExp: ℛ     Special: ?
//!     Comment: ※      Empty: ∅       CharRange: ↔  CharSet: ∈
//!     Sequence: ,     Alternation: |  Group: (
//!     RepeatZeroOrMore: {  RepeatOneOrMore: ⁺  Optional: [
//!     BoundedRepetition: ×  Difference: −
//!     SeparatedBy: ⋯  SeparatedEndBy: ⋯  Between: ⟨

use crate::ebnf::ast::{snapshot_from_document, AstSnapshot, Document};
use crate::ebnf::formats::registry::{FormatError, Formatter};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Grammar" => "⧉",
        "Rule" => "≔",
        "Identifier" => "○",
        "Token" => "‘",
        "RegExp" => "ℛ",
        "Special" => "?",
        "Comment" => "※",
        "Empty" => "∅",
        "CharRange" => "↔",
        "CharSet" => "∈",
        "Sequence" => ",",
        "Alternation" => "|",
        "Group" => "(",
        "RepeatZeroOrMore" => "{",
        "RepeatOneOrMore" => "⁺",
        "Optional" => "[",
        "BoundedRepetition" => "×",
        "Difference" => "−",
        "SeparatedBy" | "SeparatedEndBy" => "⋯",
        "Between" => "⟨",
        _ => "•",
    }
}

/// Build treeviz output from an AstSnapshot
fn format_snapshot(snapshot: &AstSnapshot, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);
    let label = truncate(&snapshot.label, 30);

    output.push_str(&format!("{prefix}{connector} {icon} {label}\n"));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(snapshot, &child_prefix, output);
}

fn format_children(snapshot: &AstSnapshot, prefix: &str, output: &mut String) {
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, prefix, i + 1 == child_count, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let snapshot = snapshot_from_document(doc);
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    );
    format_children(&snapshot, "", &mut output);
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
