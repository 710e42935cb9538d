use crate::error::DocumentLoadError;

/// Where a document sits, as shown above its content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Leading segments, shown muted.
    pub trail: Vec<String>,
    /// The document's own segment, without its extension.
    pub active: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub html: String,
    pub breadcrumb: Breadcrumb,
}

/// The content pane.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Pane {
    /// Nothing has been rendered yet.
    #[default]
    Blank,
    Document(Document),
    /// The document couldn't be fetched. Replaces whatever was shown.
    Failed(DocumentLoadError),
}

impl Pane {
    pub fn document(&self) -> Option<&Document> {
        match self {
            Pane::Document(document) => Some(document),
            _ => None,
        }
    }
}

fn strip_doc_extension<'s, S: AsRef<str>>(segment: &'s str, extensions: &[S]) -> &'s str {
    match segment.rsplit_once('.') {
        Some((stem, ext)) if extensions.iter().any(|e| e.as_ref().eq_ignore_ascii_case(ext)) => stem,
        _ => segment,
    }
}

/// Breadcrumb segments for `path`. The content `root` prefix is removed
/// (with or without its leading `/`), empty segments are dropped, and any of
/// the document `extensions` is stripped from the last segment.
///
/// ```
/// use quire::engine::breadcrumb;
///
/// let crumb = breadcrumb("content/guide/install.md", "/content/", &["md"]);
/// assert_eq!(crumb.trail, ["guide"]);
/// assert_eq!(crumb.active, "install");
/// ```
pub fn breadcrumb<S: AsRef<str>>(path: &str, root: &str, extensions: &[S]) -> Breadcrumb {
    let root = root.trim_start_matches('/');
    let path = path.trim_start_matches('/');
    let path = match path.strip_prefix(root) {
        Some(rest) if !root.is_empty() => rest,
        _ => path,
    };

    let mut segments: Vec<String> = path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let active = segments.pop()
        .map(|last| strip_doc_extension(&last, extensions).to_string())
        .unwrap_or_default();

    Breadcrumb { trail: segments, active }
}

/// Converts a fetched document into the content pane: markdown to HTML with
/// highlighted code, plus its breadcrumb.
pub fn render_document<S: AsRef<str>>(
    path: &str,
    source: &str,
    root: &str,
    extensions: &[S],
) -> Document {
    Document {
        path: path.to_string(),
        html: crate::markdown::render(source),
        breadcrumb: breadcrumb(path, root, extensions),
    }
}
