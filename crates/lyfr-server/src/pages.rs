//! Server-rendered pages.
//!
//! Markup is assembled by hand: the surface is three pages and a sidebar,
//! not worth a template engine.

use lyfr_library::{Chapter, Registry};

/// Minimal HTML text escaping for titles and slugs.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(book_title: &str, page_title: &str, sidebar: &str, main: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="manifest" href="/manifest.webmanifest">
<link rel="icon" href="/icon.svg" type="image/svg+xml">
<title>{page} — {book}</title>
</head>
<body>
<header><a href="/">{book}</a></header>
<nav>{sidebar}</nav>
<main>{main}</main>
</body>
</html>
"#,
        page = escape(page_title),
        book = escape(book_title),
        sidebar = sidebar,
        main = main,
    )
}

fn sidebar(registry: &Registry, active_slug: &str) -> String {
    let mut out = String::new();
    for section in registry.sections() {
        out.push_str(&format!("<h2>{}</h2>\n<ul>\n", escape(&section.title)));
        for entry in &section.entries {
            let class = if entry.slug == active_slug {
                r#" class="active""#
            } else {
                ""
            };
            out.push_str(&format!(
                "<li{class}><a href=\"/{slug}\">{title}</a>",
                class = class,
                slug = escape(&entry.slug),
                title = escape(&entry.title),
            ));
            if !entry.anchors.is_empty() {
                out.push_str("\n<ul>\n");
                for anchor in &entry.anchors {
                    out.push_str(&format!(
                        "<li><a href=\"/{slug}#{id}\">{title}</a></li>\n",
                        slug = escape(&entry.slug),
                        id = escape(&anchor.id),
                        title = escape(&anchor.title),
                    ));
                }
                out.push_str("</ul>\n");
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
    }
    out
}

/// The rendered chapter page.
pub fn chapter_page(registry: &Registry, chapter: &Chapter) -> String {
    let main = format!(
        "<article>\n<h1>{title}</h1>\n<p class=\"readtime\">{minutes} min read</p>\n{body}</article>\n",
        title = escape(&chapter.title),
        minutes = chapter.minutes,
        body = chapter.html,
    );
    layout(
        registry.book_title(),
        &chapter.title,
        &sidebar(registry, &chapter.slug),
        &main,
    )
}

/// The not-found page, linking back to the first chapter.
pub fn not_found_page(registry: &Registry, slug: &str) -> String {
    let first = registry.first_slug();
    let main = format!(
        "<article>\n<h1>Chapter not found</h1>\n<p>No chapter named <code>{slug}</code>.</p>\n<p><a href=\"/{first}\">Start reading</a></p>\n</article>\n",
        slug = escape(slug),
        first = escape(first),
    );
    layout(registry.book_title(), "Not found", &sidebar(registry, ""), &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyfr_library::Registry;

    fn registry() -> Registry {
        Registry::from_toml(
            r#"
title = "Test Book"

[[section]]
title = "PART ONE"

[[section.entry]]
title = "Alpha & Omega"
slug = "part-a"
file = "a.md"

[[section.entry.anchor]]
title = "First Steps"
id = "first-steps"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_sidebar_marks_active_entry_and_anchors() {
        let html = sidebar(&registry(), "part-a");
        assert!(html.contains(r#"class="active""#));
        assert!(html.contains(r#"href="/part-a#first-steps""#));
        assert!(html.contains("Alpha &amp; Omega"));
    }

    #[test]
    fn test_not_found_links_first_slug() {
        let html = not_found_page(&registry(), "part-zz");
        assert!(html.contains(r#"href="/part-a""#));
        assert!(html.contains("part-zz"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>&"x""#), "&lt;b&gt;&amp;&quot;x&quot;");
    }
}
