//! Template context — the key/value binding built from blog records.

use std::collections::BTreeMap;

use snuggle_core::types::{Blog, Post, PostStatus};

use crate::error::ContextError;
use crate::value::{Item, Value};

static ABSENT: Value = Value::Absent;

/// Immutable key → [`Value`] mapping bound into a render call.
///
/// The renderer never mutates a context; loop processing derives per-item
/// contexts via [`TemplateContext::for_item`], where item fields override
/// outer keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, replacing any previous binding.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a key. Unknown keys are absent, never an error.
    pub fn get(&self, key: &str) -> &Value {
        self.values.get(key).unwrap_or(&ABSENT)
    }

    /// Derived context for one loop item: the outer context shallow-merged
    /// with the item's fields, item fields winning on collision.
    pub fn for_item(&self, item: &Item) -> TemplateContext {
        let mut merged = self.clone();
        for (key, value) in item {
            merged.values.insert(key.clone(), value.clone());
        }
        merged
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Build the list-page context for a blog.
    ///
    /// Draft and private posts are invisible to skins: they are excluded
    /// from `posts` and do not count toward `post_count`/`has_posts`.
    pub fn from_blog(blog: &Blog, posts: &[Post]) -> Self {
        let published: Vec<&Post> = posts
            .iter()
            .filter(|p| matches!(p.status, PostStatus::Published))
            .collect();

        let post_items: Vec<Item> = published.iter().map(|p| post_item(p)).collect();
        let category_items: Vec<Item> = blog
            .categories
            .iter()
            .map(|c| {
                let mut item = Item::new();
                item.insert("id".to_string(), Value::from(c.id.clone()));
                item.insert("name".to_string(), Value::from(c.name.clone()));
                item.insert("post_count".to_string(), Value::from(c.post_count));
                item
            })
            .collect();

        let mut ctx = TemplateContext::new();
        ctx.set("blog_id", blog.id.0.clone());
        ctx.set("blog_name", blog.name.clone());
        ctx.set("blog_description", blog.description.clone());
        ctx.set("post_count", published.len());
        ctx.set("category_count", blog.categories.len());
        ctx.set("visitor_count", blog.visitor_count);
        ctx.set("today_visitor_count", blog.today_visitor_count);
        ctx.set("created_date", format_date(&blog.created_at));
        ctx.set("has_posts", !published.is_empty());
        ctx.set("has_categories", !blog.categories.is_empty());
        ctx.set("posts", post_items);
        ctx.set("categories", category_items);
        ctx
    }

    /// Layer detail-page keys for one post over a blog context.
    pub fn with_post(mut self, post: &Post) -> Self {
        self.set("post_id", post.id.0.clone());
        self.set("title", post.title.clone());
        self.set("excerpt", post.excerpt.clone());
        self.set("content", post.content.clone());
        self.set("date", format_date(&post.created_at));
        self.set("thumbnail", post.thumbnail.clone());
        self.set("comment_count", post.comment_count);
        self.set("like_count", post.like_count);
        self
    }

    /// Parse a context from a JSON object string (the CLI input format).
    pub fn from_json_str(input: &str) -> Result<Self, ContextError> {
        let document: serde_json::Value = serde_json::from_str(input)?;
        let serde_json::Value::Object(fields) = document else {
            return Err(ContextError::NotAnObject {
                found: json_type_name(&document),
            });
        };
        let mut ctx = TemplateContext::new();
        for (key, value) in &fields {
            ctx.set(key.clone(), Value::from_json(value));
        }
        Ok(ctx)
    }
}

fn post_item(post: &Post) -> Item {
    let mut item = Item::new();
    item.insert("id".to_string(), Value::from(post.id.0.clone()));
    item.insert("title".to_string(), Value::from(post.title.clone()));
    item.insert("excerpt".to_string(), Value::from(post.excerpt.clone()));
    item.insert("date".to_string(), Value::from(format_date(&post.created_at)));
    item.insert("thumbnail".to_string(), Value::from(post.thumbnail.clone()));
    item.insert("comment_count".to_string(), Value::from(post.comment_count));
    item.insert("like_count".to_string(), Value::from(post.like_count));
    item
}

fn format_date(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use snuggle_core::types::{Blog, BlogId, Category, Post, PostId, PostStatus};

    use super::*;

    fn make_post(id: &str, title: &str, status: PostStatus) -> Post {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        Post {
            id: PostId::from(id),
            title: title.to_string(),
            excerpt: format!("{title} excerpt"),
            content: format!("<p>{title}</p>"),
            thumbnail: None,
            status,
            comment_count: 2,
            like_count: 5,
            created_at: at,
            updated_at: at,
        }
    }

    fn make_blog() -> Blog {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        Blog {
            id: BlogId::from("b-01"),
            name: "My Blog".to_string(),
            description: "daily notes".to_string(),
            visitor_count: 1234,
            today_visitor_count: 17,
            categories: vec![Category {
                id: "c-01".to_string(),
                name: "rust".to_string(),
                post_count: 3,
            }],
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn unknown_key_is_absent() {
        let ctx = TemplateContext::new();
        assert_eq!(*ctx.get("nope"), Value::Absent);
    }

    #[test]
    fn from_blog_populates_known_keys() {
        let posts = vec![
            make_post("p-1", "First", PostStatus::Published),
            make_post("p-2", "Second", PostStatus::Published),
        ];
        let ctx = TemplateContext::from_blog(&make_blog(), &posts);

        assert_eq!(*ctx.get("blog_name"), Value::Str("My Blog".to_string()));
        assert_eq!(*ctx.get("post_count"), Value::Num(2.0));
        assert_eq!(*ctx.get("visitor_count"), Value::Num(1234.0));
        assert_eq!(*ctx.get("created_date"), Value::Str("2026-01-02".to_string()));
        assert_eq!(*ctx.get("has_posts"), Value::Bool(true));
        let Value::List(items) = ctx.get("posts") else {
            panic!("posts must be a list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], Value::Str("First".to_string()));
        assert_eq!(items[0]["date"], Value::Str("2026-03-14".to_string()));
    }

    #[test]
    fn from_blog_filters_unpublished_posts() {
        let posts = vec![
            make_post("p-1", "Live", PostStatus::Published),
            make_post("p-2", "Hidden draft", PostStatus::Draft),
            make_post("p-3", "Hidden private", PostStatus::Private),
        ];
        let ctx = TemplateContext::from_blog(&make_blog(), &posts);

        assert_eq!(*ctx.get("post_count"), Value::Num(1.0));
        let Value::List(items) = ctx.get("posts") else {
            panic!("posts must be a list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], Value::Str("Live".to_string()));
    }

    #[test]
    fn from_blog_without_posts_is_falsy() {
        let ctx = TemplateContext::from_blog(&make_blog(), &[]);
        assert_eq!(*ctx.get("has_posts"), Value::Bool(false));
        assert!(!ctx.get("posts").is_truthy());
    }

    #[test]
    fn with_post_layers_detail_keys() {
        let post = make_post("p-1", "First", PostStatus::Published);
        let ctx = TemplateContext::from_blog(&make_blog(), std::slice::from_ref(&post))
            .with_post(&post);

        assert_eq!(*ctx.get("title"), Value::Str("First".to_string()));
        assert_eq!(*ctx.get("content"), Value::Str("<p>First</p>".to_string()));
        assert_eq!(*ctx.get("thumbnail"), Value::Absent);
        // blog keys remain visible on the detail page
        assert_eq!(*ctx.get("blog_name"), Value::Str("My Blog".to_string()));
    }

    #[test]
    fn for_item_merges_with_item_precedence() {
        let mut ctx = TemplateContext::new();
        ctx.set("title", "outer");
        ctx.set("blog_name", "My Blog");

        let mut item = Item::new();
        item.insert("title".to_string(), Value::from("inner"));

        let merged = ctx.for_item(&item);
        assert_eq!(*merged.get("title"), Value::Str("inner".to_string()));
        assert_eq!(*merged.get("blog_name"), Value::Str("My Blog".to_string()));
        // outer context untouched
        assert_eq!(*ctx.get("title"), Value::Str("outer".to_string()));
    }

    #[test]
    fn from_json_str_object_roundtrip() {
        let ctx = TemplateContext::from_json_str(
            r#"{"blog_name": "My Blog", "post_count": 5, "has_posts": true,
                "posts": [{"title": "A"}], "missing": null}"#,
        )
        .expect("parse");
        assert_eq!(*ctx.get("blog_name"), Value::Str("My Blog".to_string()));
        assert_eq!(*ctx.get("post_count"), Value::Num(5.0));
        assert_eq!(*ctx.get("has_posts"), Value::Bool(true));
        assert_eq!(*ctx.get("missing"), Value::Absent);
        assert!(matches!(ctx.get("posts"), Value::List(items) if items.len() == 1));
    }

    #[test]
    fn from_json_str_rejects_non_objects() {
        let err = TemplateContext::from_json_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"), "got: {err}");
        assert!(err.to_string().contains("an array"));
    }
}
