//! HTML rendering with anchored headings.
//!
//! Rendering assigns each h2–h4 heading the same anchor id that
//! [`extract_outline`](crate::markdown::outline::extract_outline) reports
//! for the document, by allocating ids in document order from a fresh
//! [`HeadingIdAllocator`].

use lyfr_core::HeadingIdAllocator;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::markdown::outline::in_outline;

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown to HTML, injecting generated anchor ids into h2–h4.
///
/// # Example
///
/// ```rust
/// use lyfr_content::render_html;
///
/// let html = render_html("## Closures & Scope\n\nBody text.\n");
/// assert!(html.contains(r#"<h2 id="closures--scope">"#));
/// ```
pub fn render_html(content: &str) -> String {
    let mut events: Vec<Event> = Parser::new_ext(content, parser_options()).collect();
    let mut alloc = HeadingIdAllocator::new();

    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Heading { level, id, .. }) = &events[i] {
            if in_outline(*level) && id.is_none() {
                let mut text = String::new();
                let mut j = i + 1;
                while j < events.len() {
                    match &events[j] {
                        Event::End(TagEnd::Heading(_)) => break,
                        Event::Text(t) | Event::Code(t) => text.push_str(t),
                        Event::SoftBreak | Event::HardBreak => text.push(' '),
                        _ => {}
                    }
                    j += 1;
                }
                let text = text.trim().to_string();
                if !text.is_empty() {
                    let anchor = alloc.allocate(&text);
                    if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                        *id = Some(anchor.into());
                    }
                }
            }
        }
        i += 1;
    }

    let mut html = String::with_capacity(content.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::outline::extract_outline;

    #[test]
    fn test_render_anchors_h2_through_h4() {
        let html = render_html("## Alpha\n\n### Beta Three\n\n#### Gamma\n");
        assert!(html.contains(r#"<h2 id="alpha">"#));
        assert!(html.contains(r#"<h3 id="beta-three">"#));
        assert!(html.contains(r#"<h4 id="gamma">"#));
    }

    #[test]
    fn test_render_leaves_h1_unanchored() {
        let html = render_html("# Book Title\n");
        assert!(html.contains("<h1>Book Title</h1>"));
    }

    #[test]
    fn test_render_ids_agree_with_outline() {
        let content = "## Setup\n\n## Setup\n\n### Event Loop & Async JavaScript\n";
        let outline = extract_outline(content);
        let html = render_html(content);
        for heading in &outline {
            assert!(
                html.contains(&format!(r#"id="{}""#, heading.id)),
                "missing anchor {}",
                heading.id
            );
        }
    }

    #[test]
    fn test_render_plain_markdown() {
        let html = render_html("Some *emphasis* and `code`.\n");
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_render_tables_enabled() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
