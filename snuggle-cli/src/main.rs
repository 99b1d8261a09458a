//! Snuggle — blog skin tooling CLI.
//!
//! # Usage
//!
//! ```text
//! snuggle skins install <dir> [--name <name>]
//! snuggle skins list
//! snuggle render <skin> [--dir <path>] [--context <file.json>] [--page list|detail] [--out <dir>] [--dry-run]
//! snuggle check <skin> [--dir <path>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, render::RenderArgs, skins::SkinsCommand};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "snuggle",
    version,
    about = "Install, lint, and preview-render blog skins",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the installed skin store.
    Skins {
        #[command(subcommand)]
        command: SkinsCommand,
    },

    /// Render a skin's page regions to files.
    Render(RenderArgs),

    /// Lint a skin's templates and report degradations.
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Skins { command } => commands::skins::run(command),
        Commands::Render(args) => args.run(),
        Commands::Check(args) => args.run(),
    }
}
