//! ISO 14977 renderer
//!
//! Each rule is written as
//!
//! ```text
//!
//! name
//!     = definition;
//! ```
//!
//! Construct spellings:
//!
//!     Sequence            a, b, c
//!     Alternation         a | b | c
//!     Group               ( a )
//!     RepeatZeroOrMore    { a }
//!     RepeatOneOrMore     a, { a }
//!     Optional            [ a ]
//!     BoundedRepetition   3 * a            (minimum == maximum only)
//!     Difference          a - b
//!     Token               'text' or "te'xt"
//!     Special             ? text ?
//!     RegExp              ?/pattern/?
//!     CharRange/CharSet   ?/[a-z]/?  ?/[^abc]/?
//!     Comment             (* text *)
//!
//! Sequences and alternations stay on one line while that line is shorter than the
//! configured width; otherwise every element goes on its own indented line. The
//! sugar constructs (sepby, sependby, between) are rendered through their expansion.
//!
//! A special sequence ends at the first `?`, so special text, patterns and character
//! classes containing one are refused, as are comments containing `*)`.
//!
//! Operands are parenthesized where ISO precedence would otherwise regroup them:
//! alternation binds loosest, then concatenation, then exception, then `N *`.
//! Nested sequences and alternations are flattened as written.
//! Lazy flags have no EBNF spelling and are dropped.
//!
//! Rendering never modifies the tree.

use crate::ebnf::ast::{Children, Document, Node, RuleTable};
use crate::ebnf::formats::registry::{FormatError, Formatter};
use log::debug;
use std::borrow::Cow;

/// Layout settings for the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Sequences and alternations whose one-line text reaches this many characters are
    /// split over several lines
    pub line_width: usize,
    /// Prefix of continuation lines
    pub indent: String,
    /// Deepest nesting rendered before failing with `TooDeep`
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent: "\t".to_string(),
            max_depth: 256,
        }
    }
}

/// Render every rule of `table`, in table order.
pub fn render(table: &RuleTable, options: &RenderOptions) -> Result<String, FormatError> {
    debug!("rendering {} rules as EBNF", table.len());
    let renderer = Renderer { options };
    let mut output = String::new();
    for rule in table {
        let definition = renderer.expr(&rule.definition, 0)?;
        output.push_str(&format!(
            "\n{}\n{}= {};\n",
            rule.name, options.indent, definition.text
        ));
    }
    Ok(output)
}

/// Render a single expression.
pub fn render_node(node: &Node, options: &RenderOptions) -> Result<String, FormatError> {
    Renderer { options }.expr(node, 0).map(|expr| expr.text)
}

/// Binding strength of a rendered expression, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Alternation,
    Concatenation,
    Exception,
    Factor,
    Primary,
}

struct Expr {
    text: String,
    level: Level,
}

impl Expr {
    fn new(text: impl Into<String>, level: Level) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    fn primary(text: impl Into<String>) -> Self {
        Self::new(text, Level::Primary)
    }

    /// The text, parenthesized if it binds looser than `minimum`
    fn at_least(self, minimum: Level) -> String {
        if self.level < minimum {
            format!("( {} )", self.text)
        } else {
            self.text
        }
    }
}

struct Renderer<'a> {
    options: &'a RenderOptions,
}

impl Renderer<'_> {
    fn expr(&self, node: &Node, depth: usize) -> Result<Expr, FormatError> {
        if depth > self.options.max_depth {
            return Err(FormatError::TooDeep {
                limit: self.options.max_depth,
            });
        }
        let depth = depth + 1;

        match node {
            Node::Identifier(name) => Ok(Expr::primary(name.as_str())),
            Node::Token(text) => quote(text).map(Expr::primary),
            Node::RegExp(pattern) => {
                special_safe(node, pattern)?;
                Ok(Expr::primary(format!("?{}?", delimited(pattern))))
            }
            Node::Special(text) => {
                special_safe(node, text)?;
                Ok(Expr::primary(format!("? {text} ?")))
            }
            Node::Comment(text) => {
                if text.contains("*)") {
                    return Err(unrenderable(node, "comment text contains '*)'"));
                }
                Ok(Expr::primary(format!("(* {text} *)")))
            }
            Node::Empty(_) => Ok(Expr::primary("")),
            Node::CharRange { first, last } => {
                special_safe(node, &[*first, *last].iter().collect::<String>())?;
                Ok(Expr::primary(format!(
                    "?/[{}-{}]/?",
                    escape_class(*first),
                    escape_class(*last)
                )))
            }
            Node::CharSet(set) => {
                let chars: String = set.chars().iter().map(|c| escape_class(*c)).collect();
                special_safe(node, &chars)?;
                let negation = if set.is_negative() { "^" } else { "" };
                Ok(Expr::primary(format!("?/[{negation}{chars}]/?")))
            }
            Node::Sequence(items) => self.concatenation(items, depth),
            Node::Alternation(items) => self.alternation(items, depth),
            Node::Group(body) => {
                let inner = self.children(body, depth)?;
                Ok(Expr::primary(format!("( {} )", inner.text)))
            }
            Node::RepeatZeroOrMore { body, .. } => {
                let inner = self.children(body, depth)?;
                Ok(Expr::primary(format!("{{ {} }}", inner.text)))
            }
            Node::RepeatOneOrMore { body, .. } => {
                let inner = self.children(body, depth)?;
                let repeated = inner.text.clone();
                let first = inner.at_least(Level::Concatenation);
                Ok(Expr::new(
                    format!("{first}, {{ {repeated} }}"),
                    Level::Concatenation,
                ))
            }
            Node::Optional { body, .. } => {
                let inner = self.children(body, depth)?;
                Ok(Expr::primary(format!("[ {} ]", inner.text)))
            }
            Node::BoundedRepetition(repetition) => {
                if !repetition.is_exact() {
                    return Err(unrenderable(
                        node,
                        &format!(
                            "{}..{} repetitions have no ISO 14977 spelling",
                            repetition.minimum, repetition.maximum
                        ),
                    ));
                }
                let target = self.expr(&repetition.target, depth)?;
                Ok(Expr::new(
                    format!("{} * {}", repetition.maximum, target.at_least(Level::Primary)),
                    Level::Factor,
                ))
            }
            Node::Difference {
                minuend,
                subtrahend,
            } => {
                let minuend = self.expr(minuend, depth)?.at_least(Level::Factor);
                let subtrahend = self.expr(subtrahend, depth)?.at_least(Level::Factor);
                Ok(Expr::new(
                    format!("{minuend} - {subtrahend}"),
                    Level::Exception,
                ))
            }
            Node::SeparatedBy { .. } | Node::SeparatedEndBy { .. } | Node::Between { .. } => {
                match node.desugar() {
                    Some(expansion) => self.expr(&expansion, depth),
                    None => Err(unrenderable(node, "no expansion")),
                }
            }
        }
    }

    /// A one-or-many body renders as its node, or as the sequence of its list
    fn children(&self, body: &Children, depth: usize) -> Result<Expr, FormatError> {
        match body {
            Children::Single(node) => self.expr(node, depth),
            Children::Many(items) => self.concatenation(items, depth),
        }
    }

    fn concatenation(&self, items: &[Node], depth: usize) -> Result<Expr, FormatError> {
        self.join(items, depth, Level::Concatenation, ", ", ",\n", "")
    }

    fn alternation(&self, items: &[Node], depth: usize) -> Result<Expr, FormatError> {
        self.join(items, depth, Level::Alternation, " | ", "\n", "| ")
    }

    /// Join operands on one line, or one per line when the line gets too wide.
    ///
    /// Multi-line form: `first{break}{indent}{lead}second...`
    fn join(
        &self,
        items: &[Node],
        depth: usize,
        level: Level,
        separator: &str,
        break_after: &str,
        lead: &str,
    ) -> Result<Expr, FormatError> {
        match items {
            [] => return Ok(Expr::primary("")),
            [only] => return self.expr(only, depth),
            _ => {}
        }

        // both operators are associative, so only looser operands need parentheses
        let parts = items
            .iter()
            .map(|item| -> Result<String, FormatError> {
                Ok(self.expr(item, depth)?.at_least(level))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let line = parts.join(separator);
        if line.chars().count() < self.options.line_width && !line.contains('\n') {
            return Ok(Expr::new(line, level));
        }

        let multi_separator = format!("{break_after}{}{lead}", self.options.indent);
        Ok(Expr::new(parts.join(&multi_separator), level))
    }
}

/// Single quotes, or double quotes when the text contains a single quote.
fn quote(text: &str) -> Result<String, FormatError> {
    match (text.contains('\''), text.contains('"')) {
        (false, _) => Ok(format!("'{text}'")),
        (true, false) => Ok(format!("\"{text}\"")),
        (true, true) => Err(FormatError::Unrenderable {
            construct: "Token".to_string(),
            reason: format!("{text:?} contains both quote characters"),
        }),
    }
}

/// The pattern wrapped in `/.../` unless it already is
fn delimited(pattern: &str) -> Cow<'_, str> {
    if pattern.len() >= 2 && pattern.starts_with('/') && pattern.ends_with('/') {
        Cow::Borrowed(pattern)
    } else {
        Cow::Owned(format!("/{pattern}/"))
    }
}

fn escape_class(c: char) -> String {
    match c {
        '\\' | ']' | '^' | '-' => format!("\\{c}"),
        _ => c.to_string(),
    }
}

/// Text placed inside `? ... ?` must not close it early
fn special_safe(node: &Node, text: &str) -> Result<(), FormatError> {
    if text.contains('?') {
        return Err(unrenderable(node, "special sequence text contains '?'"));
    }
    Ok(())
}

fn unrenderable(node: &Node, reason: &str) -> FormatError {
    FormatError::Unrenderable {
        construct: node.kind().name().to_string(),
        reason: reason.to_string(),
    }
}

/// Formatter implementation for EBNF text
#[derive(Debug, Clone, Default)]
pub struct EbnfFormatter {
    pub options: RenderOptions,
}

impl EbnfFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Formatter for EbnfFormatter {
    fn name(&self) -> &str {
        "ebnf"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        render(&doc.rules, &self.options)
    }

    fn description(&self) -> &str {
        "ISO 14977 EBNF text"
    }
}
