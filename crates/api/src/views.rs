//! Server-rendered HTML views.
//!
//! Every value interpolated into markup goes through [`escape_html`]; the
//! only unescaped fragment is a version body after it has been through the
//! Markdown renderer, which escapes raw HTML itself. Page names in links and
//! form actions are percent-encoded with [`page_path`] first.

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::Html;
use wiki_core::markup::{escape_html, render};
use wiki_core::page::page_path;
use wiki_core::types::Timestamp;
use wiki_db::models::page::{Page, PageSummary};
use wiki_db::models::version::Version;

/// Name of the hidden form field carrying an overridden HTTP verb.
pub const METHOD_FIELD: &str = "__method";

fn layout(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Wiki</title>
</head>
<body>
<header><nav><a href="/">All pages</a> | <a href="/new">New page</a></nav></header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    ))
}

/// `href`-ready path of a page.
fn href(name: &str) -> String {
    escape_html(&page_path(name))
}

fn timestamp(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `GET /`
pub fn index(pages: &[PageSummary]) -> Html<String> {
    let mut content = String::from("<h1>All pages</h1>\n");
    if pages.is_empty() {
        content.push_str("<p>No pages yet.</p>\n");
    } else {
        content.push_str("<ul class=\"pages\">\n");
        for page in pages {
            let _ = writeln!(
                content,
                r#"<li><a href="{path}">{title}</a> <small>{name}, updated {updated}</small></li>"#,
                path = href(&page.name),
                name = escape_html(&page.name),
                title = escape_html(&page.title),
                updated = timestamp(&page.updated_at),
            );
        }
        content.push_str("</ul>\n");
    }
    layout("All pages", &content)
}

/// `GET /new`
pub fn new_page_form() -> Html<String> {
    let content = r#"<h1>New page</h1>
<form method="post" action="/">
<p><label>Name <input type="text" name="name" required></label></p>
<p><label>Title <input type="text" name="title" required></label></p>
<p><label>Body<br><textarea name="body" rows="20" cols="80" required></textarea></label></p>
<p><button type="submit">Create page</button></p>
</form>
"#;
    layout("New page", content)
}

/// `GET /{name}` and `GET /{name}/versions/{version_id}`.
pub fn show(page: &Page, version: &Version) -> Html<String> {
    let path = href(&page.name);
    let mut content = String::new();

    if page.version_id != Some(version.id) {
        let _ = writeln!(
            content,
            r#"<p class="notice">You are viewing an old version of this page. <a href="{path}">View the current version</a>.</p>"#,
        );
    }

    let _ = write!(
        content,
        r#"<article>
<h1>{title}</h1>
{body}</article>
<footer>
<p>Version {id} by {author}, {created}</p>
<p><a href="{path}/versions/new">Edit</a> | <a href="{path}/versions">History</a></p>
</footer>
"#,
        title = escape_html(&version.title),
        body = render(&version.body),
        id = version.id,
        author = escape_html(&version.author().to_string()),
        created = timestamp(&version.created_at),
    );

    layout(&version.title, &content)
}

/// `GET /{name}/versions`
pub fn history(page: &Page, versions: &[Version]) -> Html<String> {
    let name = escape_html(&page.name);
    let path = href(&page.name);
    let mut content = format!(
        "<h1>History of <a href=\"{path}\">{name}</a></h1>\n\
         <table class=\"history\">\n\
         <thead><tr><th>Version</th><th>Title</th><th>Author</th><th>Created</th></tr></thead>\n\
         <tbody>\n"
    );

    for version in versions {
        let current = if page.version_id == Some(version.id) {
            " (current)"
        } else {
            ""
        };
        let _ = writeln!(
            content,
            r#"<tr><td><a href="{path}/versions/{id}">{id}</a>{current}</td><td>{title}</td><td>{author}</td><td>{created}</td></tr>"#,
            id = version.id,
            title = escape_html(&version.title),
            author = escape_html(&version.author().to_string()),
            created = timestamp(&version.created_at),
        );
    }
    content.push_str("</tbody>\n</table>\n");

    layout(&format!("History of {}", page.name), &content)
}

/// `GET /{name}/versions/new`
///
/// HTML forms can only POST, so the form carries `__method=PUT`.
pub fn edit_form(page: &Page, current: &Version) -> Html<String> {
    let content = format!(
        r#"<h1>Editing {name}</h1>
<form method="post" action="{path}">
<input type="hidden" name="{METHOD_FIELD}" value="PUT">
<p><label>Title <input type="text" name="title" value="{title}" required></label></p>
<p><label>Body<br><textarea name="body" rows="20" cols="80" required>{body}</textarea></label></p>
<p><button type="submit">Save</button> <a href="{path}">Cancel</a></p>
</form>
"#,
        name = escape_html(&page.name),
        path = href(&page.name),
        title = escape_html(&current.title),
        body = escape_html(&current.body),
    );
    layout(&format!("Editing {}", page.name), &content)
}

/// Error page for any non-success status.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let content = format!(
        "<h1>{}</h1>\n<p>{}</p>\n",
        escape_html(&heading),
        escape_html(message)
    );
    layout(&heading, &content)
}
