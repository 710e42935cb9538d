use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};

/// Name of the optional settings file in a project directory.
pub const SETTINGS_FILE: &str = "quire.toml";

/// Extensions, compared case-insensitively, of files that become documents.
pub const DOC_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Builder settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Content root, relative to the project directory.
    pub content_dir: PathBuf,
    /// Where the manifest is written, relative to the project directory.
    pub manifest: PathBuf,
    /// The `root` string recorded in the manifest.
    pub root: String,
    pub extensions: Vec<String>,
    /// Entries whose names start with this prefix are skipped.
    pub hidden_prefix: String,
    /// Markdown written to the content root's `README.md` on bootstrap.
    pub placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            content_dir: PathBuf::from("content"),
            manifest: PathBuf::from("manifest.json"),
            root: "/content/".into(),
            extensions: DOC_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            hidden_prefix: ".".into(),
            placeholder: "# Welcome\n\nAdd your documents to the **content/** folder.".into(),
        }
    }
}

impl Settings {
    /// Reads `quire.toml` from `project` if it exists, otherwise returns the
    /// defaults.
    pub fn discover<P: AsRef<Path>>(project: P) -> Result<Self> {
        let path = project.as_ref().join(SETTINGS_FILE);
        if !path.is_file() {
            return Ok(Settings::default());
        }

        Settings::read(&path)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let string = fs::read_to_string(path).chain_with(|| error! {
            "failed to read settings file",
            "path" => path.display(),
        })?;

        toml::from_str(&string).chain_with(|| error! {
            "invalid settings file",
            "path" => path.display(),
        })
    }

    /// Returns `true` if `file_name` has one of the document extensions.
    pub fn is_document(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self.extensions.iter()
                .any(|known| known.eq_ignore_ascii_case(ext)),
            _ => false,
        }
    }

    pub fn is_hidden(&self, file_name: &str) -> bool {
        !self.hidden_prefix.is_empty() && file_name.starts_with(&*self.hidden_prefix)
    }

    /// The manifest path as a `/`-separated site path.
    pub fn manifest_location(&self) -> String {
        let parts: Vec<_> = self.manifest.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect();

        parts.join("/")
    }

    /// The default document recorded when the tree contains no document.
    pub fn fallback_doc(&self) -> String {
        format!("{}README.md", self.root)
    }
}
