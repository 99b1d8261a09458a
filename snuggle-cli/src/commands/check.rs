//! `snuggle check` — lint a skin's templates.
//!
//! The renderer never fails on malformed markup; it silently degrades.
//! This command surfaces everything the renderer would tolerate so skin
//! authors can fix it before publishing.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use snuggle_core::types::SkinTemplates;
use snuggle_renderer::{parse_with_diagnostics, partial_refs, DiagnosticKind, POST_ITEM_PARTIAL};

/// Arguments for `snuggle check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Name of an installed skin (omit when using `--dir`).
    pub skin: Option<String>,

    /// Check a skin directory instead of the store.
    #[arg(long, conflicts_with = "skin")]
    pub dir: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Issue {
    fragment: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    detail: String,
}

#[derive(Serialize)]
struct CheckReportJson {
    skin: String,
    issue_count: usize,
    issues: Vec<Issue>,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let skin = super::load_target_skin(self.skin.as_deref(), self.dir.as_deref())?;

        let mut issues = Vec::new();
        for (fragment, source) in fragment_sources(&skin.templates) {
            let (nodes, diagnostics) = parse_with_diagnostics(source);
            for diagnostic in diagnostics {
                issues.push(Issue {
                    fragment,
                    kind: kind_key(diagnostic.kind),
                    line: Some(diagnostic.line),
                    detail: diagnostic.detail,
                });
            }
            for name in partial_refs(&nodes) {
                if name != POST_ITEM_PARTIAL {
                    issues.push(Issue {
                        fragment,
                        kind: "unknown_partial",
                        line: None,
                        detail: format!(
                            "partial '{name}' is not available; only '{POST_ITEM_PARTIAL}' is registered"
                        ),
                    });
                }
            }
        }

        let name = skin.meta.name.to_string();
        if self.json {
            let report = CheckReportJson {
                skin: name.clone(),
                issue_count: issues.len(),
                issues,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report.issue_count > 0 {
                bail!("{} template issue(s) found in '{name}'", report.issue_count);
            }
            return Ok(());
        }

        if issues.is_empty() {
            println!("{} '{name}' — no template issues", "✓".green().bold());
            return Ok(());
        }

        println!("{} template issue(s) in '{name}':", issues.len());
        for issue in &issues {
            let line = issue.line.map(|l| format!(":{l}")).unwrap_or_default();
            println!(
                "  {}  {}{}  {}",
                "■".yellow().bold(),
                issue.fragment,
                line,
                issue.detail
            );
        }
        bail!("{} template issue(s) found in '{name}'", issues.len())
    }
}

fn kind_key(kind: DiagnosticKind) -> &'static str {
    match kind {
        DiagnosticKind::UnterminatedTag => "unterminated_tag",
        DiagnosticKind::UnclosedBlock => "unclosed_block",
        DiagnosticKind::StrayCloseTag => "stray_close_tag",
    }
}

/// The seven HTML fragments, in region order. CSS is not a template and
/// is never linted.
fn fragment_sources(templates: &SkinTemplates) -> [(&'static str, &String); 7] {
    [
        ("head", &templates.head),
        ("header", &templates.header),
        ("post_list", &templates.post_list),
        ("post_item", &templates.post_item),
        ("post_detail", &templates.post_detail),
        ("sidebar", &templates.sidebar),
        ("footer", &templates.footer),
    ]
}
