//! Markdown to HTML rendering for version bodies.
//!
//! Bodies are CommonMark with the table and strikethrough extensions. Raw
//! HTML in a body is never passed through: it is re-emitted as text so it
//! shows up escaped on the page. Link and image destinations with a script
//! or data scheme are replaced with `#`.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// URL schemes a browser would execute or inline instead of navigating.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Render a Markdown document to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn safe_destination(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore whitespace and control characters inside a scheme.
    let scheme: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|s| scheme.starts_with(s)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Escape text for interpolation into HTML element content or a
/// double- or single-quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph() {
        assert_eq!(render("B"), "<p>B</p>\n");
    }

    #[test]
    fn emphasis_and_headings() {
        let html = render("# Title\n\nsome *emphasis* and **strong**");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<strong>strong</strong>"));
    }

    #[test]
    fn tables_enabled() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn strikethrough_enabled() {
        assert!(render("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn raw_block_html_is_escaped() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn raw_inline_html_is_escaped() {
        let html = render("click <a href=\"x\">here</a>");
        assert!(!html.contains("<a href"));
        assert!(html.contains("&lt;a href"));
    }

    #[test]
    fn script_link_destinations_are_replaced() {
        let html = render("[click](javascript:alert(1))");
        assert_eq!(html, "<p><a href=\"#\">click</a></p>\n");

        let html = render("[x](  JavaScript:alert(1)) <vbscript:msgbox>").to_ascii_lowercase();
        assert!(!html.contains(r#"href="javascript"#));
        assert!(!html.contains(r#"href="vbscript"#));
        assert_eq!(html.matches(r##"href="#""##).count(), 2);
    }

    #[test]
    fn data_image_destinations_are_replaced() {
        let html = render("![pic](data:image/svg+xml;base64,PHN2Zz4=)");
        assert!(html.contains(r##"src="#""##));
        assert!(!html.contains("data:"));
    }

    #[test]
    fn ordinary_links_are_kept() {
        let html = render("[docs](https://example.com/a?b=c) and [page](/home)");
        assert!(html.contains(r#"href="https://example.com/a?b=c""#));
        assert!(html.contains(r#"href="/home""#));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b class="x">Tom & Jerry's</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("API docs"), "API docs");
    }
}
