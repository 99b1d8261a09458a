//! Snuggle core library — domain types, skin store, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`SkinStoreError`]
//! - [`store`] — load / save / install skins
//!
//! Everything the renderer consumes (blog, post, category records and the
//! [`SkinTemplates`] fragment set) lives here; the renderer itself is in
//! the `snuggle-renderer` crate.

pub mod error;
pub mod store;
pub mod types;

pub use error::SkinStoreError;
pub use types::{
    Blog, BlogId, Category, Post, PostId, PostStatus, Skin, SkinMeta, SkinName, SkinTemplates,
};
