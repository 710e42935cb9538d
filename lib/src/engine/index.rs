use derive_more::Deref;
use rustc_hash::FxHashMap;

use crate::manifest::TreeNode;

/// Separator between the titles of a document's hierarchy.
pub const TRAIL_SEPARATOR: &str = " / ";

/// Search data for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatIndexEntry {
    pub title: String,
    pub path: String,
    /// Lowercased ancestor titles and the document's own title, joined by
    /// [`TRAIL_SEPARATOR`]. Only matched against, never shown.
    pub hierarchy_text: String,
}

/// Every document of a tree in depth-first order, searchable by path.
#[derive(Debug, Default, Clone, Deref)]
pub struct FlatIndex {
    #[deref]
    entries: Vec<FlatIndexEntry>,
    by_path: FxHashMap<String, usize>,
}

impl FlatIndex {
    /// Flattens `tree`, carrying the trail of ancestor titles down to each
    /// document.
    pub fn build(tree: &[TreeNode]) -> Self {
        fn flatten<'t>(tree: &'t [TreeNode], trail: &mut Vec<&'t str>, index: &mut FlatIndex) {
            for node in tree {
                match node {
                    TreeNode::Dir { children, .. } => {
                        trail.push(node.title());
                        flatten(children, trail, index);
                        trail.pop();
                    }
                    TreeNode::File { path, .. } => {
                        trail.push(node.title());
                        let hierarchy_text = trail.join(TRAIL_SEPARATOR).to_lowercase();
                        trail.pop();

                        index.by_path.entry(path.clone()).or_insert(index.entries.len());
                        index.entries.push(FlatIndexEntry {
                            title: node.title().to_string(),
                            path: path.clone(),
                            hierarchy_text,
                        });
                    }
                }
            }
        }

        let mut index = FlatIndex::default();
        flatten(tree, &mut vec![], &mut index);
        index
    }

    pub fn get(&self, path: &str) -> Option<&FlatIndexEntry> {
        self.by_path.get(path).map(|&i| &self.entries[i])
    }
}

/// Flattens `tree` into its search entries.
pub fn flatten_index(tree: &[TreeNode]) -> FlatIndex {
    FlatIndex::build(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::assign_titles;
    use crate::manifest::documents;
    use crate::manifest::fixtures::{dir, file};

    fn tree() -> Vec<TreeNode> {
        assign_titles(&[
            dir("content/Guide/", vec![
                dir("content/Guide/Advanced/", vec![file("content/Guide/Advanced/tuning-tips.md")]),
                file("content/Guide/install.md"),
            ]),
            dir("content/empty/", vec![]),
            file("content/README.md"),
        ])
    }

    #[test]
    fn one_entry_per_document() {
        let tree = tree();
        let index = flatten_index(&tree);
        assert_eq!(index.len(), documents(&tree).count());

        let paths: Vec<_> = index.iter().map(|e| e.path.as_str()).collect();
        let expected: Vec<_> = documents(&tree).map(|n| n.path()).collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn hierarchy_text_is_lowercase_trail() {
        let index = flatten_index(&tree());
        let tips = index.get("content/Guide/Advanced/tuning-tips.md").unwrap();
        assert_eq!(tips.title, "Tuning tips");
        assert_eq!(tips.hierarchy_text, "guide / advanced / tuning tips");

        assert_eq!(index.get("content/Guide/install.md").unwrap().hierarchy_text, "guide / install");
        assert_eq!(index.get("content/README.md").unwrap().hierarchy_text, "readme");
        assert!(index.get("content/missing.md").is_none());
    }
}
