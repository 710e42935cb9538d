//! The manifest: a snapshot of the document tree shared by the builder and
//! the engine.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};

/// A directory or document in the manifest tree.
///
/// Paths are relative to the project directory and `/`-separated. Directory
/// paths end in `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Dir {
        name: String,
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default)]
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Dir { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Dir { path, .. } | TreeNode::File { path, .. } => path,
        }
    }

    /// The display title, or the raw name if the node hasn't been titled.
    pub fn title(&self) -> &str {
        match self {
            TreeNode::Dir { title, name, .. } | TreeNode::File { title, name, .. } => {
                title.as_deref().unwrap_or(name)
            }
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Dir { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }
}

/// Iterates over every file node of a tree in depth-first order.
pub fn documents(tree: &[TreeNode]) -> Documents<'_> {
    Documents { stack: vec![tree.iter()] }
}

pub struct Documents<'a> {
    stack: Vec<std::slice::Iter<'a, TreeNode>>,
}

impl<'a> Iterator for Documents<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = match self.stack.last_mut()?.next() {
                Some(node) => node,
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            match node {
                TreeNode::Dir { children, .. } => self.stack.push(children.iter()),
                TreeNode::File { .. } => return Some(node),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(with = "iso8601")]
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub default_doc: String,
    pub tree: Vec<TreeNode>,
}

impl Manifest {
    /// Stamps a titled tree with the current time, at the millisecond
    /// precision the manifest is written with.
    pub fn new(root: impl Into<String>, default_doc: impl Into<String>, tree: Vec<TreeNode>) -> Self {
        Manifest {
            generated_at: Utc::now().trunc_subsecs(3),
            root: root.into(),
            default_doc: default_doc.into(),
            tree,
        }
    }

    pub fn documents(&self) -> Documents<'_> {
        documents(&self.tree)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).chain(error!("failed to serialize manifest"))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).chain(error!("manifest is not valid JSON"))
    }
}

mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let string = String::deserialize(de)?;
        DateTime::parse_from_rfc3339(&string)
            .map(|time| time.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::{dir, file};

    static_assertions::assert_impl_all!(Manifest: Send, Sync);
    static_assertions::assert_impl_all!(TreeNode: Send, Sync);

    #[test]
    fn serialized_shape() {
        let json = r#"{
          "generatedAt": "2024-05-01T10:00:00.000Z",
          "root": "/content/",
          "defaultDoc": "content/README.md",
          "tree": [
            {
              "type": "dir",
              "name": "guide",
              "path": "content/guide/",
              "title": "guide",
              "children": [
                { "type": "file", "name": "install.md", "path": "content/guide/install.md", "title": "Install" }
              ]
            },
            { "type": "file", "name": "README.md", "path": "content/README.md", "title": "README" }
          ]
        }"#;

        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.root, "/content/");
        assert_eq!(manifest.default_doc, "content/README.md");
        assert_eq!(manifest.tree.len(), 2);
        assert!(manifest.tree[0].is_dir());
        assert_eq!(manifest.tree[0].children()[0].title(), "Install");

        let output = manifest.to_json().unwrap();
        assert!(output.contains("\"generatedAt\": \"2024-05-01T10:00:00.000Z\""));
        assert!(output.contains("\"type\": \"file\""));
        assert!(output.contains("\n  \"root\""));
        assert_eq!(Manifest::from_json(&output).unwrap(), manifest);
    }

    #[test]
    fn untitled_nodes_omit_title() {
        let json = serde_json::to_string(&file("content/a.md")).unwrap();
        assert_eq!(json, r#"{"type":"file","name":"a.md","path":"content/a.md"}"#);
        assert_eq!(file("content/a.md").title(), "a.md");
    }

    #[test]
    fn documents_are_depth_first() {
        let tree = vec![
            dir("content/a/", vec![
                dir("content/a/b/", vec![file("content/a/b/deep.md")]),
                file("content/a/one.md"),
            ]),
            dir("content/empty/", vec![]),
            file("content/top.md"),
        ];

        let paths: Vec<_> = documents(&tree).map(|n| n.path()).collect();
        assert_eq!(paths, ["content/a/b/deep.md", "content/a/one.md", "content/top.md"]);
    }

    #[test]
    fn fresh_manifest_survives_serialization() {
        let manifest = Manifest::new("/content/", "content/a.md", vec![file("content/a.md")]);
        assert_eq!(manifest.generated_at.timestamp_subsec_nanos() % 1_000_000, 0);

        let json = manifest.to_json().unwrap();
        assert_eq!(Manifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Manifest::from_json("{").is_err());
        assert!(Manifest::from_json(r#"{"root": "/content/"}"#).is_err());
    }
}
