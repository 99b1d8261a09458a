//! Render pipeline — AST evaluation with escaping, loops, and partials.
//!
//! Rendering is fail-soft by contract: a malformed user-authored template
//! must never take a page down. Missing variables render empty, missing
//! partials render a visible HTML comment marker, non-list loop targets
//! render nothing. No public entry point here returns a `Result`.

use std::collections::HashMap;

use crate::context::TemplateContext;
use crate::parse::{parse, Node};
use crate::value::Value;

/// The one context key emitted without HTML escaping: the post body.
/// Its value is sanitized upstream before it ever reaches a context.
pub const RAW_HTML_KEY: &str = "content";

/// Maximum depth of partial-within-partial inclusion. A partial that
/// includes itself bottoms out with a comment marker instead of
/// recursing forever.
pub const MAX_PARTIAL_DEPTH: usize = 8;

/// Render a template against a context and a partials table.
///
/// The output is the template with variables substituted (HTML-escaped
/// except [`RAW_HTML_KEY`]), conditional blocks resolved by the context's
/// truthiness, loop blocks expanded once per list item (items joined with
/// a single newline), and partials recursively rendered in the scope they
/// are referenced from.
pub fn render_template(
    template: &str,
    ctx: &TemplateContext,
    partials: &HashMap<String, String>,
) -> String {
    render_nodes(&parse(template), ctx, partials, 0)
}

/// HTML-escape `&`, `<`, `>`, `"`, and `'`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_nodes(
    nodes: &[Node],
    ctx: &TemplateContext,
    partials: &HashMap<String, String>,
    depth: usize,
) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable(name) => {
                let value = ctx.get(name).render_string();
                if name == RAW_HTML_KEY {
                    out.push_str(&value);
                } else {
                    out.push_str(&escape_html(&value));
                }
            }
            Node::Conditional { key, body } => {
                if ctx.get(key).is_truthy() {
                    out.push_str(&render_nodes(body, ctx, partials, depth));
                }
            }
            Node::Loop { key, body } => {
                if let Value::List(items) = ctx.get(key) {
                    let rendered: Vec<String> = items
                        .iter()
                        .map(|item| render_nodes(body, &ctx.for_item(item), partials, depth))
                        .collect();
                    out.push_str(&rendered.join("\n"));
                }
            }
            Node::Partial(name) => out.push_str(&render_partial(name, ctx, partials, depth)),
        }
    }
    out
}

fn render_partial(
    name: &str,
    ctx: &TemplateContext,
    partials: &HashMap<String, String>,
    depth: usize,
) -> String {
    if depth >= MAX_PARTIAL_DEPTH {
        return format!("<!-- partial \"{name}\" depth limit exceeded -->");
    }
    match partials.get(name) {
        Some(source) => render_nodes(&parse(source), ctx, partials, depth + 1),
        None => format!("<!-- partial \"{name}\" not found -->"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
