//! `snuggle render` — render a skin's page regions to files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use snuggle_renderer::{render_skin_page, PageType, SkinRegion, TemplateContext};

/// Arguments for `snuggle render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Name of an installed skin (omit when using `--dir`).
    pub skin: Option<String>,

    /// Render directly from a skin directory instead of the store.
    #[arg(long, conflicts_with = "skin")]
    pub dir: Option<PathBuf>,

    /// JSON file holding the context object; omit for an empty context.
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Page to render into the content region: list | detail.
    #[arg(long, default_value = "list")]
    pub page: PageType,

    /// Directory the rendered regions are written into.
    #[arg(long, default_value = "preview")]
    pub out: PathBuf,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let skin = super::load_target_skin(self.skin.as_deref(), self.dir.as_deref())?;
        let ctx = match &self.context {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("cannot read context file '{}'", path.display()))?;
                TemplateContext::from_json_str(&raw)
                    .with_context(|| format!("invalid context in '{}'", path.display()))?
            }
            None => TemplateContext::new(),
        };

        let page = render_skin_page(&skin.templates, &ctx, self.page);

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        println!("{prefix}✓ '{}' rendered ({} page)", skin.meta.name, self.page);

        if !self.dry_run {
            std::fs::create_dir_all(&self.out).with_context(|| {
                format!("cannot create output directory '{}'", self.out.display())
            })?;
        }
        for region in SkinRegion::all() {
            let path = self.out.join(region.output_file());
            write_output(&path, page.region(*region), self.dry_run)?;
        }
        write_output(&self.out.join("skin.css"), &page.custom_css, self.dry_run)?;
        Ok(())
    }
}

fn write_output(path: &Path, contents: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("  ~  {} ({} bytes)", path.display(), contents.len());
        return Ok(());
    }
    std::fs::write(path, contents)
        .with_context(|| format!("cannot write '{}'", path.display()))?;
    println!("  ✎  {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
