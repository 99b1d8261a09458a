//! `snuggle skins` — manage the installed skin store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use snuggle_core::{store, types::SkinName};

/// Subcommands of `snuggle skins`.
#[derive(Subcommand, Debug)]
pub enum SkinsCommand {
    /// Install a skin directory into ~/.snuggle/skins/.
    Install(InstallArgs),

    /// List installed skins.
    List,
}

/// Arguments for `snuggle skins install`.
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Path to a skin directory (fragment files plus optional skin.yaml).
    pub dir: PathBuf,

    /// Install under this name instead of the sidecar/directory name.
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run(command: SkinsCommand) -> Result<()> {
    match command {
        SkinsCommand::Install(args) => install(args),
        SkinsCommand::List => list(),
    }
}

fn install(args: InstallArgs) -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let dir = args
        .dir
        .canonicalize()
        .with_context(|| format!("cannot resolve path '{}'", args.dir.display()))?;

    let skin = store::install_skin_at(&home, &dir, args.name.map(SkinName::from))
        .with_context(|| format!("failed to install skin from '{}'", dir.display()))?;

    println!("✓ Installed skin '{}'", skin.meta.name);
    println!("  Saved to: ~/.snuggle/skins/{}/", skin.meta.name);
    Ok(())
}

#[derive(Tabled)]
struct SkinTableRow {
    #[tabled(rename = "skin")]
    name: String,
    #[tabled(rename = "author")]
    author: String,
    #[tabled(rename = "installed")]
    installed: String,
}

fn list() -> Result<()> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    let metas = store::list_skins_at(&home).context("failed to read skin store")?;

    println!(
        "Snuggle v{} | {} skin(s) installed",
        env!("CARGO_PKG_VERSION"),
        metas.len()
    );
    if metas.is_empty() {
        println!("No skins installed. Run `snuggle skins install <dir>` first.");
        return Ok(());
    }

    let rows: Vec<SkinTableRow> = metas
        .into_iter()
        .map(|meta| SkinTableRow {
            name: meta.name.0,
            author: if meta.author.is_empty() { "-".to_string() } else { meta.author },
            installed: meta.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
