//! The manifest builder: scans a content directory and writes the manifest.

mod scan;
mod title;
mod watch;

pub use scan::scan_directory;
pub use title::{assign_titles, make_title, select_default_doc, ROOT_README};
pub use watch::{Rebuilds, Watcher};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Chainable, Result};
use crate::manifest::{Manifest, TreeNode};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Builder {
    project: PathBuf,
    settings: Settings,
}

/// Stamps a titled tree into a manifest. Falls back to
/// [`Settings::fallback_doc()`] when the tree has no document.
pub fn emit_manifest(tree: Vec<TreeNode>, settings: &Settings) -> Manifest {
    let default_doc = select_default_doc(&tree).unwrap_or_else(|| settings.fallback_doc());
    Manifest::new(settings.root.clone(), default_doc, tree)
}

impl Builder {
    pub fn new<P: AsRef<Path>>(project: P, settings: Settings) -> Self {
        Builder { project: project.as_ref().to_path_buf(), settings }
    }

    /// A builder for `project` configured by its settings file, if any.
    pub fn discover<P: AsRef<Path>>(project: P) -> Result<Self> {
        let settings = Settings::discover(project.as_ref())?;
        Ok(Builder::new(project, settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn content_dir(&self) -> PathBuf {
        self.project.join(&self.settings.content_dir)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project.join(&self.settings.manifest)
    }

    /// Creates the content root and a placeholder `README.md` if the root
    /// doesn't exist. Returns `true` if it did so.
    pub fn bootstrap(&self) -> Result<bool> {
        let content = self.content_dir();
        if content.exists() {
            return Ok(false);
        }

        fs::create_dir_all(&content).chain_with(|| error! {
            "failed to create content directory",
            "path" => content.display(),
        })?;

        let readme = content.join(ROOT_README);
        fs::write(&readme, &self.settings.placeholder).chain_with(|| error! {
            "failed to write placeholder document",
            "path" => readme.display(),
        })?;

        tracing::info!(path = %readme.display(), "created content directory with placeholder");
        Ok(true)
    }

    /// Scans the content root into an untitled tree.
    pub fn scan(&self) -> Result<Vec<TreeNode>> {
        scan_directory(&self.content_dir(), &self.project, &self.settings)
    }

    /// Scans, titles and stamps the tree without writing anything.
    pub fn build(&self) -> Result<Manifest> {
        let tree = assign_titles(&self.scan()?);
        Ok(emit_manifest(tree, &self.settings))
    }

    /// A full generation pass: bootstrap, build, then write the manifest.
    pub fn generate(&self) -> Result<Manifest> {
        self.bootstrap()?;
        let manifest = self.build()?;
        let json = manifest.to_json()?;

        let path = self.manifest_path();
        let parent = path.parent().unwrap_or(&self.project);
        fs::create_dir_all(parent)?;

        // Readers only ever see a complete manifest.
        let failed = || error! {
            "failed to write manifest",
            "path" => path.display(),
        };

        let mut file = NamedTempFile::new_in(parent).chain_with(failed)?;
        file.write_all(json.as_bytes()).chain_with(failed)?;
        file.persist(&path).chain_with(failed)?;

        let shown = path.strip_prefix(&self.project).unwrap_or(&path);
        tracing::info!(documents = manifest.documents().count(), "manifest generated → {}", shown.display());
        Ok(manifest)
    }
}
