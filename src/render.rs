//! Server-side HTML rendering.
//!
//! Pages are assembled as plain strings: a shared shell plus per-route
//! bodies. The tree view renders entries exactly in upstream order;
//! directory nodes get an entry link plus a toggle button, file nodes are
//! plain labels. Prefetched children are emitted inline as a hidden nested
//! list so the first expansion needs no round trip.

use std::collections::HashMap;

use crate::models::{ContentEntry, EntryType};
use crate::routes::tree::RouteContext;

/// Minimal HTML escape for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/app.css\">\n\
         </head>\n\
         <body>\n{}\n\
         <script src=\"/static/app.js\" defer></script>\n\
         </body>\n\
         </html>\n",
        escape(title),
        body
    )
}

pub fn landing_page() -> String {
    let body = "<main class=\"landing\">\n\
         <h1>hub-viewer</h1>\n\
         <p>Browse any GitHub repository's file tree.</p>\n\
         <form method=\"get\" action=\"/\">\n\
         <label>User<br><input name=\"user\" required></label><br>\n\
         <label>Repo<br><input name=\"repo\" required></label><br>\n\
         <button type=\"submit\">GO!</button>\n\
         </form>\n\
         </main>";
    page("hub-viewer", body)
}

pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<main class=\"error\">\n\
         <h1>{}</h1>\n\
         <p>{}</p>\n\
         <p><a href=\"/\">Back to start</a></p>\n\
         </main>",
        status,
        escape(message)
    );
    page(&format!("{status} — hub-viewer"), &body)
}

pub fn tree_page(
    ctx: &RouteContext,
    root: &[ContentEntry],
    prefetched: &HashMap<String, Vec<ContentEntry>>,
) -> String {
    let reference_attr = match ctx.reference.as_deref() {
        Some(reference) => format!(" data-ref=\"{}\"", escape(reference)),
        None => String::new(),
    };

    let body = format!(
        "<main class=\"tree\" data-user=\"{}\" data-repo=\"{}\"{}>\n\
         <nav class=\"breadcrumb\">{}</nav>\n\
         {}\n\
         </main>",
        escape(&ctx.user),
        escape(&ctx.repo),
        reference_attr,
        breadcrumb(ctx),
        tree_list(root, &ctx.path, ctx, prefetched),
    );
    page(&format!("{} / {}", ctx.user, ctx.repo), &body)
}

/// `user / repo` always links to the repository root; every proper prefix
/// of a non-empty path is a link and the final segment is plain text.
pub fn breadcrumb(ctx: &RouteContext) -> String {
    let root_href = match ctx.reference.as_deref() {
        Some(reference) => format!("/{}/{}?ref={}", ctx.user, ctx.repo, reference),
        None => format!("/{}/{}", ctx.user, ctx.repo),
    };

    let mut out = format!(
        "<a href=\"{}\">{} / {}</a>",
        escape(&root_href),
        escape(&ctx.user),
        escape(&ctx.repo)
    );

    if ctx.path.is_empty() {
        return out;
    }

    let segments: Vec<&str> = ctx.path.split('/').collect();
    for (index, segment) in segments.iter().enumerate() {
        out.push_str(" / ");
        if index == segments.len() - 1 {
            out.push_str(&format!(
                "<span class=\"crumb-current\">{}</span>",
                escape(segment)
            ));
        } else {
            let prefix = segments[..=index].join("/");
            out.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape(&tree_query(&prefix, ctx.reference.as_deref())),
                escape(segment)
            ));
        }
    }

    out
}

/// One subtree as a `<ul>` of entries. Also the body of the fragment route.
pub fn tree_list(
    entries: &[ContentEntry],
    parent_path: &str,
    ctx: &RouteContext,
    prefetched: &HashMap<String, Vec<ContentEntry>>,
) -> String {
    entry_list(entries, parent_path, ctx, prefetched, false)
}

fn entry_list(
    entries: &[ContentEntry],
    parent_path: &str,
    ctx: &RouteContext,
    prefetched: &HashMap<String, Vec<ContentEntry>>,
    hidden: bool,
) -> String {
    let attrs = if hidden {
        " class=\"entries children\" hidden"
    } else {
        " class=\"entries\""
    };

    let mut out = format!("<ul{attrs}>\n");
    for entry in entries {
        out.push_str(&tree_item(entry, parent_path, ctx, prefetched));
    }
    out.push_str("</ul>");
    out
}

fn tree_item(
    entry: &ContentEntry,
    parent_path: &str,
    ctx: &RouteContext,
    prefetched: &HashMap<String, Vec<ContentEntry>>,
) -> String {
    let label = escape(label(&entry.path, parent_path));

    if entry.entry_type != EntryType::Dir {
        return format!("<li class=\"entry file\">{label}</li>\n");
    }

    let href = escape(&tree_query(&entry.path, ctx.reference.as_deref()));

    let children = match prefetched.get(&entry.path) {
        // One level deep only, so no prefetch lookup below this point
        Some(children) => format!(
            "\n{}",
            entry_list(children, &entry.path, ctx, &HashMap::new(), true)
        ),
        None => String::new(),
    };

    format!(
        "<li class=\"entry dir\">\
         <a class=\"entry-link\" href=\"{}\">{}</a> \
         <button class=\"toggle\" type=\"button\" data-path=\"{}\" aria-expanded=\"false\">&#9662;</button>{}\
         </li>\n",
        href,
        label,
        escape(&entry.path),
        children
    )
}

/// Display label: the entry path with the parent path and its separator
/// stripped. Root entries keep the full path.
fn label<'a>(entry_path: &'a str, parent_path: &str) -> &'a str {
    if parent_path.is_empty() {
        return entry_path;
    }
    entry_path
        .strip_prefix(parent_path)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(entry_path)
}

fn tree_query(path: &str, reference: Option<&str>) -> String {
    match reference {
        Some(reference) => format!("?path={path}&ref={reference}"),
        None => format!("?path={path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentLinks;

    fn ctx(path: &str, reference: Option<&str>) -> RouteContext {
        RouteContext {
            user: "octocat".into(),
            repo: "hello".into(),
            path: path.into(),
            reference: reference.map(String::from),
        }
    }

    fn entry(path: &str, entry_type: EntryType) -> ContentEntry {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        ContentEntry {
            name,
            path: path.into(),
            sha: "0000".into(),
            size: 0,
            url: format!("https://api.github.com/repos/octocat/hello/contents/{path}"),
            html_url: None,
            git_url: None,
            download_url: None,
            entry_type,
            links: ContentLinks {
                self_url: format!("https://api.github.com/repos/octocat/hello/contents/{path}"),
                git: None,
                html: None,
            },
        }
    }

    #[test]
    fn label_strips_parent_prefix_and_separator() {
        assert_eq!(label("src/utils", "src"), "utils");
        assert_eq!(label("a/b/c.rs", "a/b"), "c.rs");
    }

    #[test]
    fn root_labels_keep_the_full_path() {
        assert_eq!(label("src", ""), "src");
    }

    #[test]
    fn breadcrumb_links_every_proper_prefix() {
        let html = breadcrumb(&ctx("a/b/c", None));

        assert!(html.contains("<a href=\"/octocat/hello\">octocat / hello</a>"));
        assert!(html.contains("<a href=\"?path=a\">a</a>"));
        assert!(html.contains("<a href=\"?path=a/b\">b</a>"));
        assert!(html.contains("<span class=\"crumb-current\">c</span>"));
        assert!(!html.contains("?path=a/b/c"), "final segment must not link");
    }

    #[test]
    fn breadcrumb_for_root_is_just_the_repo_link() {
        let html = breadcrumb(&ctx("", None));
        assert_eq!(html, "<a href=\"/octocat/hello\">octocat / hello</a>");
    }

    #[test]
    fn breadcrumb_preserves_the_ref() {
        let html = breadcrumb(&ctx("a/b", Some("dev")));
        assert!(html.contains("<a href=\"/octocat/hello?ref=dev\">"));
        assert!(html.contains("<a href=\"?path=a&amp;ref=dev\">a</a>"));
    }

    #[test]
    fn directories_render_exactly_one_toggle() {
        let html = tree_list(
            &[entry("src", EntryType::Dir)],
            "",
            &ctx("", None),
            &HashMap::new(),
        );
        assert_eq!(html.matches("class=\"toggle\"").count(), 1);
        assert!(html.contains("data-path=\"src\""));
    }

    #[test]
    fn files_never_render_a_toggle() {
        let html = tree_list(
            &[entry("README.md", EntryType::File)],
            "",
            &ctx("", None),
            &HashMap::new(),
        );
        assert!(!html.contains("class=\"toggle\""));
        assert!(html.contains("<li class=\"entry file\">README.md</li>"));
    }

    #[test]
    fn symlinks_render_as_plain_entries() {
        let html = tree_list(
            &[entry("link", EntryType::Other)],
            "",
            &ctx("", None),
            &HashMap::new(),
        );
        assert!(!html.contains("class=\"toggle\""));
    }

    #[test]
    fn prefetched_children_render_inline_and_hidden() {
        let mut prefetched = HashMap::new();
        prefetched.insert("src".to_string(), vec![entry("src/utils", EntryType::Dir)]);

        let html = tree_list(
            &[entry("src", EntryType::Dir)],
            "",
            &ctx("", None),
            &prefetched,
        );

        assert!(html.contains("<ul class=\"entries children\" hidden>"));
        // Nested label has the parent prefix stripped
        assert!(html.contains(">utils</a>"));
    }

    #[test]
    fn unprefetched_directories_render_no_children() {
        let html = tree_list(
            &[entry("src", EntryType::Dir)],
            "",
            &ctx("", None),
            &HashMap::new(),
        );
        assert!(!html.contains("children"));
    }

    #[test]
    fn entry_text_is_html_escaped() {
        let html = tree_list(
            &[entry("<script>alert(1)</script>", EntryType::File)],
            "",
            &ctx("", None),
            &HashMap::new(),
        );
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn entry_links_carry_path_and_ref() {
        let html = tree_list(
            &[entry("src", EntryType::Dir)],
            "",
            &ctx("", Some("v2")),
            &HashMap::new(),
        );
        assert!(html.contains("href=\"?path=src&amp;ref=v2\""));
    }

    #[test]
    fn landing_page_has_the_form_fields() {
        let html = landing_page();
        assert!(html.contains("<input name=\"user\""));
        assert!(html.contains("<input name=\"repo\""));
        assert!(html.contains("method=\"get\""));
    }

    #[test]
    fn error_page_shows_the_status() {
        let html = error_page(502, "GitHub responded with 500");
        assert!(html.contains("<h1>502</h1>"));
        assert!(html.contains("GitHub responded with 500"));
    }

    #[test]
    fn tree_page_embeds_route_data_for_the_client_script() {
        let html = tree_page(&ctx("", Some("main")), &[], &HashMap::new());
        assert!(html.contains("data-user=\"octocat\""));
        assert!(html.contains("data-repo=\"hello\""));
        assert!(html.contains("data-ref=\"main\""));
    }
}
