//! Domain types for the Snuggle skin system.
//!
//! Blog/post/category records are the shapes the surrounding application
//! fetches from its database; the renderer only ever sees them through a
//! `TemplateContext`. All types are serializable/deserializable via serde.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a blog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlogId(pub String);

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BlogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BlogId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed identifier for a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PostId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for an installed skin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkinName(pub String);

impl fmt::Display for SkinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SkinName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SkinName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Publication state of a post. Only published posts are visible to skins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Published,
    Draft,
    Private,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Published => write!(f, "published"),
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Private => write!(f, "private"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single blog post.
///
/// `content` holds the sanitized HTML body; it is the one field the
/// renderer emits without escaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub like_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post category within a blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub post_count: u32,
}

/// A blog owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub visitor_count: u64,
    #[serde(default)]
    pub today_visitor_count: u64,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Metadata sidecar persisted next to a skin's template files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinMeta {
    pub name: SkinName,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The seven user-authored template fragments of a skin plus its raw CSS.
///
/// `post_item` is never rendered standalone; it is the partial available to
/// the other fragments. `custom_css` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkinTemplates {
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub post_list: String,
    #[serde(default)]
    pub post_item: String,
    #[serde(default)]
    pub post_detail: String,
    #[serde(default)]
    pub sidebar: String,
    #[serde(default)]
    pub footer: String,
    #[serde(default)]
    pub custom_css: String,
}

/// A complete installed skin: metadata plus template sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub meta: SkinMeta,
    pub templates: SkinTemplates,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
