//! Subcommand implementations for the `snuggle` binary.

pub mod check;
pub mod render;
pub mod skins;

use std::path::Path;

use anyhow::{bail, Context, Result};
use snuggle_core::{
    store,
    types::{Skin, SkinName},
};

/// Resolve the skin a command operates on: an installed skin by name, or
/// an arbitrary skin directory via `--dir`.
pub(crate) fn load_target_skin(name: Option<&str>, dir: Option<&Path>) -> Result<Skin> {
    match (name, dir) {
        (_, Some(dir)) => store::read_skin_dir(dir)
            .with_context(|| format!("failed to read skin directory '{}'", dir.display())),
        (Some(name), None) => {
            let home = dirs::home_dir().context("could not determine home directory")?;
            store::load_skin_at(&home, &SkinName::from(name))
                .with_context(|| format!("failed to load skin '{name}' — run `snuggle skins list`"))
        }
        (None, None) => bail!("provide a skin name or use --dir"),
    }
}
