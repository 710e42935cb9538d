use crate::manifest::{documents, TreeNode};

/// Name, compared case-insensitively, of the document preferred as default
/// when it sits directly in the content root.
pub const ROOT_README: &str = "README.md";

/// Display title for a document file name: the extension is dropped, `-` and
/// `_` become spaces and the first character is capitalized.
///
/// ```
/// use quire::builder::make_title;
///
/// assert_eq!(make_title("getting-started.md"), "Getting started");
/// assert_eq!(make_title("api_reference.markdown"), "Api reference");
/// assert_eq!(make_title("README.md"), "README");
/// ```
pub fn make_title(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };

    let mut chars = stem.chars().map(|c| if c == '-' || c == '_' { ' ' } else { c });
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns a titled copy of `tree`. Directories are titled with their raw
/// name, documents with [`make_title()`]. Titles derive from names only, so
/// applying this to its own output changes nothing.
pub fn assign_titles(tree: &[TreeNode]) -> Vec<TreeNode> {
    tree.iter()
        .map(|node| match node {
            TreeNode::Dir { name, path, children, .. } => TreeNode::Dir {
                name: name.clone(),
                path: path.clone(),
                title: Some(name.clone()),
                children: assign_titles(children),
            },
            TreeNode::File { name, path, .. } => TreeNode::File {
                name: name.clone(),
                path: path.clone(),
                title: Some(make_title(name)),
            },
        })
        .collect()
}

/// Picks the document shown when no navigation target is given: a
/// `README.md` directly in the content root if there is one, otherwise the
/// first document in depth-first order.
pub fn select_default_doc(tree: &[TreeNode]) -> Option<String> {
    let readme = tree.iter()
        .find(|node| !node.is_dir() && node.name().eq_ignore_ascii_case(ROOT_README));

    readme.or_else(|| documents(tree).next())
        .map(|node| node.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::fixtures::{dir, file};

    fn sample() -> Vec<TreeNode> {
        vec![
            dir("content/guide/", vec![
                file("content/guide/getting_started.md"),
                dir("content/guide/deep/", vec![file("content/guide/deep/README.md")]),
            ]),
            file("content/intro-notes.md"),
            file("content/readme.MD"),
        ]
    }

    #[test]
    fn titles() {
        assert_eq!(make_title("my-first_doc.md"), "My first doc");
        assert_eq!(make_title("éclair.md"), "Éclair");
        assert_eq!(make_title("v1.2-notes.md"), "V1.2 notes");
        assert_eq!(make_title("-dash.md"), " dash");
        assert_eq!(make_title("noext"), "Noext");

        let titled = assign_titles(&sample());
        assert_eq!(titled[0].title(), "guide");
        assert_eq!(titled[0].children()[0].title(), "Getting started");
        assert_eq!(titled[1].title(), "Intro notes");
    }

    #[test]
    fn titles_are_idempotent_and_pure() {
        let tree = sample();
        let once = assign_titles(&tree);
        let twice = assign_titles(&once);
        assert_eq!(once, twice);
        assert_eq!(tree, sample());
    }

    #[test]
    fn root_readme_wins() {
        assert_eq!(select_default_doc(&sample()).as_deref(), Some("content/readme.MD"));

        let tree = vec![file("content/README.md"), file("content/a.md")];
        assert_eq!(select_default_doc(&tree).as_deref(), Some("content/README.md"));
    }

    #[test]
    fn first_document_otherwise() {
        let tree = vec![
            dir("content/empty/", vec![]),
            dir("content/guide/", vec![file("content/guide/README.md")]),
            file("content/z.md"),
        ];

        // A nested README isn't the root README.
        assert_eq!(select_default_doc(&tree).as_deref(), Some("content/guide/README.md"));
        assert_eq!(select_default_doc(&[]), None);
        assert_eq!(select_default_doc(&[dir("content/a/", vec![])]), None);
    }
}
