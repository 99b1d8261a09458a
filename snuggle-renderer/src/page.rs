//! Whole-page skin assembly — [`PageType`], [`SkinRegion`], [`SkinPage`].
//!
//! # Region mapping
//!
//! | Region  | Template fragment             | Output file    |
//! |---------|-------------------------------|----------------|
//! | Head    | `head`                        | `head.html`    |
//! | Header  | `header`                      | `header.html`  |
//! | Content | `post_list` or `post_detail`  | `content.html` |
//! | Sidebar | `sidebar`                     | `sidebar.html` |
//! | Footer  | `footer`                      | `footer.html`  |
//!
//! `post_item` is never a region of its own: it is registered as the only
//! partial available to the other fragments. The skin's CSS is carried
//! through untouched — it is styling, not a template.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use snuggle_core::types::SkinTemplates;

use crate::context::TemplateContext;
use crate::engine::render_template;

/// Name under which the `post_item` fragment is registered as a partial.
pub const POST_ITEM_PARTIAL: &str = "post_item";

/// Which page the content region renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageType {
    #[default]
    List,
    Detail,
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageType::List => write!(f, "list"),
            PageType::Detail => write!(f, "detail"),
        }
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(PageType::List),
            "detail" => Ok(PageType::Detail),
            other => Err(format!("unknown page type '{other}'; expected: list, detail")),
        }
    }
}

/// All rendered regions of a skin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinRegion {
    Head,
    Header,
    Content,
    Sidebar,
    Footer,
}

impl SkinRegion {
    /// All region variants in page order.
    pub fn all() -> &'static [SkinRegion] {
        &[
            SkinRegion::Head,
            SkinRegion::Header,
            SkinRegion::Content,
            SkinRegion::Sidebar,
            SkinRegion::Footer,
        ]
    }

    /// File name this region's HTML is written to by preview tooling.
    pub fn output_file(&self) -> &'static str {
        match self {
            SkinRegion::Head => "head.html",
            SkinRegion::Header => "header.html",
            SkinRegion::Content => "content.html",
            SkinRegion::Sidebar => "sidebar.html",
            SkinRegion::Footer => "footer.html",
        }
    }
}

/// The rendered output of [`render_skin_page`]: five HTML regions plus the
/// skin's CSS, assembled into a final document by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkinPage {
    pub head_html: String,
    pub header_html: String,
    pub content_html: String,
    pub sidebar_html: String,
    pub footer_html: String,
    pub custom_css: String,
}

impl SkinPage {
    /// Rendered HTML for one region.
    pub fn region(&self, region: SkinRegion) -> &str {
        match region {
            SkinRegion::Head => &self.head_html,
            SkinRegion::Header => &self.header_html,
            SkinRegion::Content => &self.content_html,
            SkinRegion::Sidebar => &self.sidebar_html,
            SkinRegion::Footer => &self.footer_html,
        }
    }
}

/// Render every region of a skin page against one context.
///
/// The content region uses the `post_list` fragment for [`PageType::List`]
/// and `post_detail` for [`PageType::Detail`]; all other regions render
/// unconditionally. Like everything in the engine, this cannot fail —
/// empty fragments simply render empty regions.
pub fn render_skin_page(
    templates: &SkinTemplates,
    ctx: &TemplateContext,
    page_type: PageType,
) -> SkinPage {
    let mut partials = HashMap::new();
    partials.insert(POST_ITEM_PARTIAL.to_string(), templates.post_item.clone());

    let content_template = match page_type {
        PageType::List => &templates.post_list,
        PageType::Detail => &templates.post_detail,
    };

    SkinPage {
        head_html: render_template(&templates.head, ctx, &partials),
        header_html: render_template(&templates.header, ctx, &partials),
        content_html: render_template(content_template, ctx, &partials),
        sidebar_html: render_template(&templates.sidebar, ctx, &partials),
        footer_html: render_template(&templates.footer, ctx, &partials),
        custom_css: templates.custom_css.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::value::{Item, Value};

    use super::*;

    fn make_templates() -> SkinTemplates {
        SkinTemplates {
            head: "<title>{{blog_name}}</title>".to_string(),
            header: "<h1>{{blog_name}}</h1>".to_string(),
            post_list: "<ul>{{#posts}}{{> post_item}}{{/posts}}</ul>".to_string(),
            post_item: "<li>{{title}}</li>".to_string(),
            post_detail: "<article>{{content}}</article>".to_string(),
            sidebar: "<aside>{{post_count}} posts</aside>".to_string(),
            footer: "<footer>{{blog_name}}</footer>".to_string(),
            custom_css: "body { color: {{not_a_variable}}; }".to_string(),
        }
    }

    fn make_ctx() -> TemplateContext {
        let mut ctx = TemplateContext::new();
        ctx.set("blog_name", "My Blog");
        ctx.set("post_count", 2u32);
        ctx.set("content", "<p>hello</p>");
        let posts: Vec<Item> = ["A", "B"]
            .iter()
            .map(|title| {
                let mut item = Item::new();
                item.insert("title".to_string(), Value::from(*title));
                item
            })
            .collect();
        ctx.set("posts", posts);
        ctx
    }

    #[test]
    fn list_page_uses_post_list_fragment() {
        let page = render_skin_page(&make_templates(), &make_ctx(), PageType::List);
        assert_eq!(page.content_html, "<ul><li>A</li>\n<li>B</li></ul>");
    }

    #[test]
    fn detail_page_uses_post_detail_fragment() {
        let page = render_skin_page(&make_templates(), &make_ctx(), PageType::Detail);
        assert_eq!(page.content_html, "<article><p>hello</p></article>");
    }

    #[test]
    fn fixed_regions_render_for_both_page_types() {
        for page_type in [PageType::List, PageType::Detail] {
            let page = render_skin_page(&make_templates(), &make_ctx(), page_type);
            assert_eq!(page.head_html, "<title>My Blog</title>");
            assert_eq!(page.header_html, "<h1>My Blog</h1>");
            assert_eq!(page.sidebar_html, "<aside>2 posts</aside>");
            assert_eq!(page.footer_html, "<footer>My Blog</footer>");
        }
    }

    #[test]
    fn css_is_passed_through_unrendered() {
        let page = render_skin_page(&make_templates(), &make_ctx(), PageType::List);
        assert_eq!(page.custom_css, "body { color: {{not_a_variable}}; }");
    }

    #[test]
    fn post_item_is_the_only_partial() {
        let mut templates = make_templates();
        templates.header = "{{> sidebar}}".to_string();
        let page = render_skin_page(&templates, &make_ctx(), PageType::List);
        assert_eq!(page.header_html, "<!-- partial \"sidebar\" not found -->");
    }

    #[test]
    fn region_accessor_matches_fields() {
        let page = render_skin_page(&make_templates(), &make_ctx(), PageType::List);
        for region in SkinRegion::all() {
            assert!(!page.region(*region).is_empty(), "empty region {region:?}");
        }
        assert_eq!(page.region(SkinRegion::Head), page.head_html);
    }

    #[test]
    fn page_type_parses_from_str() {
        assert_eq!("list".parse::<PageType>().unwrap(), PageType::List);
        assert_eq!("DETAIL".parse::<PageType>().unwrap(), PageType::Detail);
        assert!("page".parse::<PageType>().is_err());
    }
}
