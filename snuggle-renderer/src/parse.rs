//! Template parser — `{{ }}` markup to a tagged-variant AST.
//!
//! # Grammar
//!
//! | Markup                    | Node                                  |
//! |---------------------------|---------------------------------------|
//! | `{{identifier}}`          | variable substitution                 |
//! | `{{#if identifier}}…{{/if}}` | conditional block                  |
//! | `{{#identifier}}…{{/identifier}}` | loop over a list-valued key   |
//! | `{{> identifier}}`        | partial inclusion                     |
//!
//! `identifier` is `[A-Za-z0-9_]+`. Variables allow no surrounding
//! whitespace inside the braces; partial tags allow it around the name.
//! Block open tags are disambiguated by literal prefix: exactly `if`
//! followed by whitespace and an identifier opens a conditional, anything
//! else opens a loop — a list literally keyed `if` is therefore not
//! iterable.
//!
//! # Malformed markup
//!
//! Anything that is not well-formed markup stays in the output as literal
//! text: unterminated `{{`, tags whose inner text is not an identifier,
//! close tags with no matching open, and open tags that never close. Each
//! such degradation is also reported as a [`Diagnostic`] so lint tooling
//! can surface what the renderer silently tolerated.
//!
//! Nested blocks of the same name are matched balanced: an inner
//! `{{#posts}}` pairs with the nearest following `{{/posts}}`, the outer
//! with the next one.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// AST
// ---------------------------------------------------------------------------

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, emitted verbatim.
    Text(String),
    /// `{{identifier}}` — substitute and (except for the raw key) escape.
    Variable(String),
    /// `{{#if key}}…{{/if}}` — body emitted when `key` is truthy.
    Conditional { key: String, body: Vec<Node> },
    /// `{{#key}}…{{/key}}` — body emitted once per item of a list key.
    Loop { key: String, body: Vec<Node> },
    /// `{{> name}}` — inclusion of a named partial.
    Partial(String),
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Category of a template defect the parser degraded around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnterminatedTag,
    UnclosedBlock,
    StrayCloseTag,
}

/// A non-fatal template defect, reported for lint tooling. Rendering
/// never fails on these; the offending markup is emitted as literal text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line of the offending tag.
    pub line: usize,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.detail)
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Var { name: &'a str },
    OpenIf { key: &'a str, raw: &'a str },
    OpenLoop { key: &'a str, raw: &'a str },
    Close { key: &'a str, raw: &'a str },
    Partial { name: &'a str },
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn line_of(src: &str, offset: usize) -> usize {
    src[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

/// Classify the text between `{{` and `}}`. Returns `None` when the tag
/// is not well-formed markup and must stay literal.
fn classify<'a>(inner: &'a str, raw: &'a str) -> Option<Token<'a>> {
    if let Some(rest) = inner.strip_prefix('>') {
        let name = rest.trim();
        return is_identifier(name).then_some(Token::Partial { name });
    }
    if let Some(rest) = inner.strip_prefix('#') {
        if let Some(cond) = rest.strip_prefix("if") {
            if cond.starts_with(char::is_whitespace) {
                let key = cond.trim();
                if is_identifier(key) {
                    return Some(Token::OpenIf { key, raw });
                }
                return None;
            }
            // "{{#if}}" or "{{#ifx}}": not a conditional; falls through
            // to the loop rule below.
        }
        return is_identifier(rest).then_some(Token::OpenLoop { key: rest, raw });
    }
    if let Some(rest) = inner.strip_prefix('/') {
        return is_identifier(rest).then_some(Token::Close { key: rest, raw });
    }
    is_identifier(inner).then_some(Token::Var { name: inner })
}

/// Scan the source into tokens. Text runs between recognized tags are kept
/// verbatim, including any malformed tag fragments.
fn lex<'a>(src: &'a str, diagnostics: &mut Vec<Diagnostic>) -> Vec<(usize, Token<'a>)> {
    let mut tokens = Vec::new();
    let mut pending = 0; // start of the literal run not yet flushed
    let mut cursor = 0;

    while let Some(found) = src[cursor..].find("{{") {
        let open = cursor + found;
        let Some(found_close) = src[open + 2..].find("}}") else {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::UnterminatedTag,
                line: line_of(src, open),
                detail: "'{{' without a closing '}}'".to_string(),
            });
            break;
        };
        let close = open + 2 + found_close;
        let inner = &src[open + 2..close];
        let raw = &src[open..close + 2];

        match classify(inner, raw) {
            Some(token) => {
                if open > pending {
                    tokens.push((pending, Token::Text(&src[pending..open])));
                }
                tokens.push((open, token));
                pending = close + 2;
                cursor = close + 2;
            }
            // Not markup; keep it literal and look for the next "{{",
            // which may begin inside this span.
            None => cursor = open + 2,
        }
    }

    if pending < src.len() {
        tokens.push((pending, Token::Text(&src[pending..])));
    }
    tokens
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

enum BlockKind {
    Conditional,
    Loop,
}

struct Frame<'a> {
    kind: BlockKind,
    key: &'a str,
    /// Close tags match on this ("if" for conditionals, the key for loops).
    close_key: &'a str,
    raw: &'a str,
    offset: usize,
    children: Vec<Node>,
}

fn sink<'s>(stack: &'s mut Vec<Frame<'_>>, root: &'s mut Vec<Node>) -> &'s mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

/// Parse a template, collecting degradation diagnostics.
pub fn parse_with_diagnostics(src: &str) -> (Vec<Node>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let tokens = lex(src, &mut diagnostics);

    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for (offset, token) in tokens {
        match token {
            Token::Text(text) => sink(&mut stack, &mut root).push(Node::Text(text.to_string())),
            Token::Var { name } => {
                sink(&mut stack, &mut root).push(Node::Variable(name.to_string()));
            }
            Token::Partial { name } => {
                sink(&mut stack, &mut root).push(Node::Partial(name.to_string()));
            }
            Token::OpenIf { key, raw } => stack.push(Frame {
                kind: BlockKind::Conditional,
                key,
                close_key: "if",
                raw,
                offset,
                children: Vec::new(),
            }),
            Token::OpenLoop { key, raw } => stack.push(Frame {
                kind: BlockKind::Loop,
                key,
                close_key: key,
                raw,
                offset,
                children: Vec::new(),
            }),
            Token::Close { key, raw } => {
                let matches_top = stack
                    .last()
                    .map(|frame| frame.close_key == key)
                    .unwrap_or(false);
                if !matches_top {
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::StrayCloseTag,
                        line: line_of(src, offset),
                        detail: format!("close tag '{raw}' has no matching open tag"),
                    });
                    sink(&mut stack, &mut root).push(Node::Text(raw.to_string()));
                } else if let Some(frame) = stack.pop() {
                    let node = match frame.kind {
                        BlockKind::Conditional => Node::Conditional {
                            key: frame.key.to_string(),
                            body: frame.children,
                        },
                        BlockKind::Loop => Node::Loop {
                            key: frame.key.to_string(),
                            body: frame.children,
                        },
                    };
                    sink(&mut stack, &mut root).push(node);
                }
            }
        }
    }

    // Unclosed blocks degrade: the open tag becomes literal text and the
    // children it swallowed are spliced back after it.
    while let Some(frame) = stack.pop() {
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::UnclosedBlock,
            line: line_of(src, frame.offset),
            detail: format!("block '{}' is never closed", frame.raw),
        });
        let parent = sink(&mut stack, &mut root);
        parent.push(Node::Text(frame.raw.to_string()));
        parent.extend(frame.children);
    }

    (root, diagnostics)
}

/// Parse a template, discarding diagnostics. Never fails.
pub fn parse(src: &str) -> Vec<Node> {
    parse_with_diagnostics(src).0
}

/// Names of all partials referenced anywhere in the tree.
pub fn partial_refs(nodes: &[Node]) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    collect_partial_refs(nodes, &mut refs);
    refs
}

fn collect_partial_refs(nodes: &[Node], refs: &mut BTreeSet<String>) {
    for node in nodes {
        match node {
            Node::Partial(name) => {
                refs.insert(name.clone());
            }
            Node::Conditional { body, .. } | Node::Loop { body, .. } => {
                collect_partial_refs(body, refs);
            }
            Node::Text(_) | Node::Variable(_) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
