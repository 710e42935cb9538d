//! HTML rendering of the browser state.
//!
//! Interaction is expressed through attributes: folder toggles carry
//! `data-dir-path`, links carry `href="#<path>"` and `data-doc-path`, and
//! filtered or collapsed elements carry the `hidden` class.

use std::fmt::Write;

use chrono::Local;

use crate::engine::{Breadcrumb, Browser, Fetch, Pane, Sidebar, SidebarNode};
use crate::manifest::Manifest;
use crate::util::escape_html;

fn hidden_if(hidden: bool) -> &'static str {
    if hidden { " hidden" } else { "" }
}

fn write_nodes(out: &mut String, nodes: &[SidebarNode], depth: usize) {
    let class = if depth == 0 { "tree" } else { "tree nested" };
    let _ = write!(out, "<ul class=\"{class}\">");
    for node in nodes {
        match node {
            SidebarNode::Folder(folder) => {
                let _ = write!(out,
                    "<li><div class=\"folder\" data-dir-path=\"{}\"><span>📁</span><span>{}</span></div>",
                    escape_html(&folder.path), escape_html(&folder.title));

                let _ = write!(out, "<div class=\"children{}\">", hidden_if(!folder.expanded));
                if !folder.children.is_empty() {
                    write_nodes(out, &folder.children, depth + 1);
                }

                out.push_str("</div></li>");
            }
            SidebarNode::Link(link) => {
                let path = escape_html(&link.path);
                let active = if link.active { " active-link" } else { "" };
                let _ = write!(out,
                    "<li class=\"doc{}\"><a href=\"#{path}\" class=\"doc-link{active}\" data-doc-path=\"{path}\">📄 {}</a></li>",
                    hidden_if(link.hidden), escape_html(&link.label));
            }
        }
    }

    out.push_str("</ul>");
}

pub fn sidebar(sidebar: &Sidebar) -> String {
    let mut out = String::new();
    write_nodes(&mut out, &sidebar.nodes, 0);
    out
}

pub fn breadcrumb(crumb: &Breadcrumb) -> String {
    let mut out = String::new();
    for segment in &crumb.trail {
        let _ = write!(out, "<span class=\"crumb\">{}</span> / ", escape_html(segment));
    }

    let _ = write!(out, "<span class=\"crumb current\">{}</span>", escape_html(&crumb.active));
    out
}

pub fn pane(pane: &Pane) -> String {
    match pane {
        Pane::Blank => String::new(),
        Pane::Document(document) => document.html.clone(),
        Pane::Failed(error) => format!(
            "<div class=\"load-error\">Could not load: <code>{}</code></div>",
            escape_html(&error.path)
        ),
    }
}

/// `Generated: <local time>` for the manifest's generation time.
pub fn meta_info(manifest: &Manifest) -> String {
    let local = manifest.generated_at.with_timezone(&Local);
    format!("Generated: {}", local.format("%Y-%m-%d %H:%M:%S"))
}

/// The whole page: search box, sidebar, breadcrumb and content.
pub fn shell<F: Fetch>(browser: &Browser<F>) -> String {
    let crumb = browser.pane().document()
        .map(|document| breadcrumb(&document.breadcrumb))
        .unwrap_or_default();

    format!(concat!(
        "<!DOCTYPE html>\n",
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n",
        "<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n",
        "<aside>\n<input id=\"searchInput\" type=\"search\" placeholder=\"Search\" value=\"{query}\">\n",
        "<nav id=\"sidebar\">{sidebar}</nav>\n<footer id=\"metaInfo\">{meta}</footer>\n</aside>\n",
        "<main>\n<header id=\"breadcrumb\">{crumb}</header>\n",
        "<article id=\"content\">{content}</article>\n</main>\n</body>\n</html>\n"),
        title = escape_html(browser.current_path().unwrap_or("Documents")),
        query = escape_html(browser.query()),
        sidebar = sidebar(browser.sidebar()),
        meta = meta_info(browser.manifest()),
        crumb = crumb,
        content = pane(browser.pane()),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};

    use super::*;
    use crate::builder::{assign_titles, emit_manifest};
    use crate::engine::{build_sidebar, MANIFEST_PATH};
    use crate::error::DocumentLoadError;
    use crate::manifest::documents;
    use crate::manifest::fixtures::{dir, file};
    use crate::settings::Settings;

    fn tree() -> Vec<crate::manifest::TreeNode> {
        assign_titles(&[
            dir("content/a&b/", vec![
                file("content/a&b/one.md"),
                dir("content/a&b/empty/", vec![]),
            ]),
            file("content/two.md"),
        ])
    }

    fn extract_links(html: &str) -> BTreeSet<String> {
        const ATTR: &str = "data-doc-path=\"";
        html.match_indices(ATTR)
            .filter_map(|(i, _)| {
                let rest = &html[i + ATTR.len()..];
                rest.find('"').map(|end| rest[..end].replace("&amp;", "&"))
            })
            .collect()
    }

    #[test]
    fn rendered_links_match_documents() {
        let tree = tree();
        let html = sidebar(&build_sidebar(&tree));
        let docs: BTreeSet<_> = documents(&tree).map(|n| n.path().to_string()).collect();
        assert_eq!(extract_links(&html), docs);
    }

    #[test]
    fn collapsed_and_filtered_markup() {
        let tree = tree();
        let mut model = build_sidebar(&tree);
        let html = sidebar(&model);
        assert_eq!(html.matches("<div class=\"children hidden\">").count(), 2);
        assert!(html.contains("data-dir-path=\"content/a&amp;b/\""));
        assert!(html.contains("<span>a&amp;b</span>"));
        assert!(!html.contains("active-link"));

        model.toggle("content/a&b/");
        model.highlight(Some("content/two.md"));
        model.filter("one", &crate::engine::flatten_index(&tree));
        let html = sidebar(&model);
        assert_eq!(html.matches("<div class=\"children hidden\">").count(), 1);
        assert!(html.contains("<li class=\"doc hidden\"><a href=\"#content/two.md\" class=\"doc-link active-link\""));
        assert!(html.contains("<li class=\"doc\"><a href=\"#content/a&amp;b/one.md\""));
        assert!(html.contains(">📄 One</a>"));
    }

    #[test]
    fn breadcrumb_and_error_markup() {
        let crumb = Breadcrumb { trail: vec!["guide".into()], active: "install".into() };
        assert_eq!(breadcrumb(&crumb),
            "<span class=\"crumb\">guide</span> / <span class=\"crumb current\">install</span>");

        let failed = Pane::Failed(DocumentLoadError { path: "content/<x>.md".into() });
        assert_eq!(pane(&failed), "<div class=\"load-error\">Could not load: <code>content/&lt;x&gt;.md</code></div>");
        assert_eq!(pane(&Pane::Blank), "");
    }

    #[test]
    fn shell_renders_everything() {
        let manifest = emit_manifest(tree(), &Settings::default());
        let mut site = HashMap::new();
        site.insert(MANIFEST_PATH.to_string(), manifest.to_json().unwrap());
        site.insert("content/a&b/one.md".to_string(), "# One\n\nBody".to_string());

        let mut browser = Browser::load(site).unwrap();
        browser.navigate(Some("content/a%26b/one.md"));
        browser.search("on\"e");

        let page = shell(&browser);
        assert!(page.contains("<h1 id=\"one\">One</h1>"));
        assert!(page.contains("<span class=\"crumb\">a&amp;b</span>"));
        assert!(page.contains("value=\"on&quot;e\""));
        assert!(page.contains("<footer id=\"metaInfo\">Generated: "));
        assert!(page.contains("<title>content/a&amp;b/one.md</title>"));
    }
}
