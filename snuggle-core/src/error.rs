//! Error types for snuggle-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from skin store operations.
#[derive(Debug, Error)]
pub enum SkinStoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse skin metadata at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.snuggle/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// No installed skin at the expected path.
    #[error("skin not found at {path}")]
    SkinNotFound { path: PathBuf },
}
