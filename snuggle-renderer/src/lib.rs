//! # snuggle-renderer
//!
//! The skin template engine: renders user-authored `{{ }}` templates
//! against blog data to produce the HTML regions of a blog page.
//!
//! Rendering is fail-soft — malformed templates and missing data degrade
//! to empty output or visible comment markers, never an error.
//!
//! ## Usage
//!
//! ```rust
//! use snuggle_renderer::{render_skin_page, PageType, TemplateContext};
//! use snuggle_core::types::SkinTemplates;
//!
//! let mut ctx = TemplateContext::new();
//! ctx.set("blog_name", "My Blog");
//!
//! let templates = SkinTemplates {
//!     header: "<h1>{{blog_name}}</h1>".to_string(),
//!     ..SkinTemplates::default()
//! };
//!
//! let page = render_skin_page(&templates, &ctx, PageType::List);
//! assert_eq!(page.header_html, "<h1>My Blog</h1>");
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod page;
pub mod parse;
pub mod value;

pub use context::TemplateContext;
pub use engine::{escape_html, render_template, MAX_PARTIAL_DEPTH, RAW_HTML_KEY};
pub use error::ContextError;
pub use page::{render_skin_page, PageType, SkinPage, SkinRegion, POST_ITEM_PARTIAL};
pub use parse::{parse, parse_with_diagnostics, partial_refs, Diagnostic, DiagnosticKind, Node};
pub use value::{Item, Value};
