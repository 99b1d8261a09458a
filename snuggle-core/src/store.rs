//! On-disk store for user-authored skins.
//!
//! # Storage layout
//!
//! ```text
//! ~/.snuggle/
//!   skins/
//!     <skin_name>/
//!       skin.yaml        (metadata sidecar — mode 0600)
//!       head.html        (one file per template fragment — mode 0600)
//!       header.html
//!       post_list.html
//!       post_item.html
//!       post_detail.html
//!       sidebar.html
//!       footer.html
//!       skin.css
//! ```
//!
//! # API pattern
//!
//! Every mutating function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.
//!
//! A skin may omit fragment files; a missing fragment loads as the empty
//! template. Only a missing `skin.yaml` makes a skin nonexistent.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};

use crate::error::SkinStoreError;
use crate::types::{Skin, SkinMeta, SkinName, SkinTemplates};

/// Fragment file names, in fixed render-region order.
pub const FRAGMENT_FILES: &[&str] = &[
    "head.html",
    "header.html",
    "post_list.html",
    "post_item.html",
    "post_detail.html",
    "sidebar.html",
    "footer.html",
];

/// File name of the raw CSS passthrough.
pub const CSS_FILE: &str = "skin.css";

/// File name of the metadata sidecar.
pub const META_FILE: &str = "skin.yaml";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.snuggle/skins/` — pure, no I/O.
pub fn skins_dir_at(home: &Path) -> PathBuf {
    home.join(".snuggle").join("skins")
}

/// `<home>/.snuggle/skins/<skin>/` — pure, no I/O.
pub fn skin_dir_at(home: &Path, skin: &SkinName) -> PathBuf {
    skins_dir_at(home).join(&skin.0)
}

/// Lists the names of all skin directories under `<home>/.snuggle/skins/`.
pub fn list_skin_names_at(home: &Path) -> Result<Vec<SkinName>, SkinStoreError> {
    let dir = skins_dir_at(home);
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut names: Vec<SkinName> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| SkinName::from(e.file_name().to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}

/// `list_skin_names_at` convenience wrapper.
pub fn list_skin_names() -> Result<Vec<SkinName>, SkinStoreError> {
    list_skin_names_at(&home()?)
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a skin from `<home>/.snuggle/skins/<skin>/`.
///
/// Returns `SkinStoreError::SkinNotFound` if `skin.yaml` is absent,
/// `SkinStoreError::Parse` (with path + line context) if it is malformed.
/// Missing fragment files load as empty templates.
pub fn load_skin_at(home: &Path, skin: &SkinName) -> Result<Skin, SkinStoreError> {
    let dir = skin_dir_at(home, skin);
    let meta_path = dir.join(META_FILE);
    if !meta_path.exists() {
        return Err(SkinStoreError::SkinNotFound { path: meta_path });
    }
    let contents = std::fs::read_to_string(&meta_path)?;
    let meta: SkinMeta = serde_yaml::from_str(&contents)
        .map_err(|e| SkinStoreError::Parse { path: meta_path, source: e })?;
    let templates = read_templates(&dir)?;
    debug!("loaded skin '{}' from {}", skin, dir.display());
    Ok(Skin { meta, templates })
}

/// `load_skin_at` convenience wrapper.
pub fn load_skin(skin: &SkinName) -> Result<Skin, SkinStoreError> {
    load_skin_at(&home()?, skin)
}

/// Load all installed skins' metadata, sorted by skin name.
pub fn list_skins_at(home: &Path) -> Result<Vec<SkinMeta>, SkinStoreError> {
    let mut metas = Vec::new();
    for name in list_skin_names_at(home)? {
        metas.push(load_skin_at(home, &name)?.meta);
    }
    Ok(metas)
}

/// `list_skins_at` convenience wrapper.
pub fn list_skins() -> Result<Vec<SkinMeta>, SkinStoreError> {
    list_skins_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a skin to `<home>/.snuggle/skins/<skin>/`.
///
/// Each file's write flow: `.tmp` sibling → `chmod 0600` → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem —
/// no EXDEV on macOS).
pub fn save_skin_at(home: &Path, skin: &Skin) -> Result<(), SkinStoreError> {
    let dir = skin_dir_at(home, &skin.meta.name);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }

    let yaml = serde_yaml::to_string(&skin.meta)?;
    write_atomic(&dir.join(META_FILE), &yaml)?;
    for (file, source) in fragment_entries(&skin.templates) {
        write_atomic(&dir.join(file), source)?;
    }
    write_atomic(&dir.join(CSS_FILE), &skin.templates.custom_css)?;
    info!("saved skin '{}' to {}", skin.meta.name, dir.display());
    Ok(())
}

/// `save_skin_at` convenience wrapper.
pub fn save_skin(skin: &Skin) -> Result<(), SkinStoreError> {
    save_skin_at(&home()?, skin)
}

// ---------------------------------------------------------------------------
// 4. Reading a skin directory (uninstalled)
// ---------------------------------------------------------------------------

/// Read a skin from an arbitrary directory (not necessarily the store).
///
/// If `skin.yaml` is present it is parsed; otherwise metadata is
/// synthesized with the directory name as the skin name. Missing fragment
/// files read as empty templates.
pub fn read_skin_dir(dir: &Path) -> Result<Skin, SkinStoreError> {
    if !dir.is_dir() {
        return Err(SkinStoreError::SkinNotFound { path: dir.to_path_buf() });
    }
    let meta_path = dir.join(META_FILE);
    let meta = if meta_path.exists() {
        let contents = std::fs::read_to_string(&meta_path)?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SkinStoreError::Parse { path: meta_path, source: e })?
    } else {
        let now = Utc::now();
        SkinMeta {
            name: SkinName::from(
                dir.file_name()
                    .unwrap_or(dir.as_os_str())
                    .to_string_lossy()
                    .into_owned(),
            ),
            author: String::new(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    };
    let templates = read_templates(dir)?;
    Ok(Skin { meta, templates })
}

// ---------------------------------------------------------------------------
// 5. Install
// ---------------------------------------------------------------------------

/// Install a skin directory into the store, optionally renaming it.
///
/// Idempotent: if a skin of the same name is already installed, loads and
/// returns it unchanged.
pub fn install_skin_at(
    home: &Path,
    source_dir: &Path,
    name: Option<SkinName>,
) -> Result<Skin, SkinStoreError> {
    let mut skin = read_skin_dir(source_dir)?;
    if let Some(name) = name {
        skin.meta.name = name;
    }

    if skin_dir_at(home, &skin.meta.name).join(META_FILE).exists() {
        return load_skin_at(home, &skin.meta.name);
    }

    save_skin_at(home, &skin)?;
    Ok(skin)
}

/// `install_skin_at` convenience wrapper.
pub fn install_skin(source_dir: &Path, name: Option<SkinName>) -> Result<Skin, SkinStoreError> {
    install_skin_at(&home()?, source_dir, name)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, SkinStoreError> {
    dirs::home_dir().ok_or(SkinStoreError::HomeNotFound)
}

fn fragment_entries(templates: &SkinTemplates) -> [(&'static str, &String); 7] {
    [
        ("head.html", &templates.head),
        ("header.html", &templates.header),
        ("post_list.html", &templates.post_list),
        ("post_item.html", &templates.post_item),
        ("post_detail.html", &templates.post_detail),
        ("sidebar.html", &templates.sidebar),
        ("footer.html", &templates.footer),
    ]
}

fn read_templates(dir: &Path) -> Result<SkinTemplates, SkinStoreError> {
    Ok(SkinTemplates {
        head: read_fragment(&dir.join("head.html"))?,
        header: read_fragment(&dir.join("header.html"))?,
        post_list: read_fragment(&dir.join("post_list.html"))?,
        post_item: read_fragment(&dir.join("post_item.html"))?,
        post_detail: read_fragment(&dir.join("post_detail.html"))?,
        sidebar: read_fragment(&dir.join("sidebar.html"))?,
        footer: read_fragment(&dir.join("footer.html"))?,
        custom_css: read_fragment(&dir.join(CSS_FILE))?,
    })
}

fn read_fragment(path: &Path) -> Result<String, SkinStoreError> {
    if !path.exists() {
        return Ok(String::new());
    }
    Ok(std::fs::read_to_string(path)?)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), SkinStoreError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    std::fs::write(&tmp_path, contents)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), SkinStoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), SkinStoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), SkinStoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), SkinStoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
