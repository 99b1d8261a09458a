//! Whole-pipeline rendering tests: a complete skin rendered against a
//! blog context built from domain records, both page types.

use chrono::{TimeZone, Utc};
use snuggle_core::types::{Blog, BlogId, Category, Post, PostId, PostStatus, SkinTemplates};
use snuggle_renderer::{render_skin_page, render_template, PageType, TemplateContext};

fn make_post(id: &str, title: &str, status: PostStatus) -> Post {
    let at = Utc.with_ymd_and_hms(2026, 5, 20, 8, 0, 0).unwrap();
    Post {
        id: PostId::from(id),
        title: title.to_string(),
        excerpt: format!("{title} in brief"),
        content: format!("<p>{title} body</p>"),
        thumbnail: Some(format!("/thumbs/{id}.webp")),
        status,
        comment_count: 4,
        like_count: 9,
        created_at: at,
        updated_at: at,
    }
}

fn make_blog() -> Blog {
    let at = Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap();
    Blog {
        id: BlogId::from("b-01"),
        name: "Ink & Paper".to_string(),
        description: "notes on making things".to_string(),
        visitor_count: 20853,
        today_visitor_count: 112,
        categories: vec![
            Category { id: "c-01".to_string(), name: "essays".to_string(), post_count: 12 },
            Category { id: "c-02".to_string(), name: "links".to_string(), post_count: 31 },
        ],
        created_at: at,
        updated_at: at,
    }
}

fn make_templates() -> SkinTemplates {
    SkinTemplates {
        head: "<title>{{blog_name}} · {{blog_description}}</title>".to_string(),
        header: "<h1>{{blog_name}}</h1>{{#if has_posts}}<p>{{post_count}} posts</p>{{/if}}"
            .to_string(),
        post_list: "<ul>\n{{#posts}}{{> post_item}}{{/posts}}\n</ul>".to_string(),
        post_item: "<li><a href=\"/posts/{{id}}\">{{title}}</a> · {{comment_count}} comments</li>"
            .to_string(),
        post_detail: "<article><h2>{{title}}</h2>{{content}}<time>{{date}}</time></article>"
            .to_string(),
        sidebar: "<aside>{{#categories}}<span>{{name}} ({{post_count}})</span>{{/categories}}</aside>"
            .to_string(),
        footer: "<footer>{{visitor_count}} visitors since {{created_date}}</footer>".to_string(),
        custom_css: ".post { max-width: 42rem; }".to_string(),
    }
}

#[test]
fn list_page_renders_every_region() {
    let posts = vec![
        make_post("p-1", "Hello", PostStatus::Published),
        make_post("p-2", "Second", PostStatus::Published),
        make_post("p-3", "Unfinished", PostStatus::Draft),
    ];
    let ctx = TemplateContext::from_blog(&make_blog(), &posts);
    let page = render_skin_page(&make_templates(), &ctx, PageType::List);

    assert_eq!(page.head_html, "<title>Ink &amp; Paper · notes on making things</title>");
    assert_eq!(page.header_html, "<h1>Ink &amp; Paper</h1><p>2 posts</p>");
    assert_eq!(
        page.content_html,
        "<ul>\n<li><a href=\"/posts/p-1\">Hello</a> · 4 comments</li>\n\
         <li><a href=\"/posts/p-2\">Second</a> · 4 comments</li>\n</ul>"
    );
    assert!(!page.content_html.contains("Unfinished"), "draft post leaked");
    assert_eq!(
        page.sidebar_html,
        "<aside><span>essays (12)</span>\n<span>links (31)</span></aside>"
    );
    assert_eq!(page.footer_html, "<footer>20853 visitors since 2025-11-03</footer>");
    assert_eq!(page.custom_css, ".post { max-width: 42rem; }");
}

#[test]
fn detail_page_renders_raw_post_body() {
    let post = make_post("p-1", "Hello", PostStatus::Published);
    let ctx = TemplateContext::from_blog(&make_blog(), std::slice::from_ref(&post))
        .with_post(&post);
    let page = render_skin_page(&make_templates(), &ctx, PageType::Detail);

    assert_eq!(
        page.content_html,
        "<article><h2>Hello</h2><p>Hello body</p><time>2026-05-20</time></article>"
    );
    // the fixed regions still see blog-level keys
    assert_eq!(page.header_html, "<h1>Ink &amp; Paper</h1><p>1 posts</p>");
}

#[test]
fn empty_blog_renders_degraded_but_complete_page() {
    let blog = Blog { categories: vec![], ..make_blog() };
    let ctx = TemplateContext::from_blog(&blog, &[]);
    let page = render_skin_page(&make_templates(), &ctx, PageType::List);

    assert_eq!(page.header_html, "<h1>Ink &amp; Paper</h1>", "has_posts must be falsy");
    assert_eq!(page.content_html, "<ul>\n\n</ul>", "empty post list renders empty");
    assert_eq!(page.sidebar_html, "<aside></aside>");
}

#[test]
fn title_markup_in_post_data_is_escaped_everywhere() {
    let post = make_post("p-1", "<b>X</b>", PostStatus::Published);
    let ctx = TemplateContext::from_blog(&make_blog(), std::slice::from_ref(&post));
    let page = render_skin_page(&make_templates(), &ctx, PageType::List);

    assert!(page.content_html.contains("&lt;b&gt;X&lt;/b&gt;"));
    assert!(!page.content_html.contains("<b>X</b>"));
}

#[test]
fn render_template_is_pure_and_repeatable() {
    let ctx = TemplateContext::from_blog(&make_blog(), &[]);
    let template = "{{blog_name}}/{{#if has_posts}}y{{/if}}/{{#posts}}{{title}}{{/posts}}";
    let first = render_template(template, &ctx, &Default::default());
    let second = render_template(template, &ctx, &Default::default());
    assert_eq!(first, second);
    assert_eq!(first, "Ink &amp; Paper//");
}
