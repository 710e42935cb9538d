use std::collections::HashMap;
use std::fs;
use std::hash::BuildHasher;
use std::path::{Component, Path, PathBuf};

use crate::error::{Chainable, Result};

/// Retrieves site resources by path: the manifest and raw documents.
pub trait Fetch {
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Serves files from a site directory on disk.
#[derive(Debug, Clone)]
pub struct FsFetch {
    root: PathBuf,
}

impl FsFetch {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FsFetch { root: root.as_ref().to_path_buf() }
    }

    /// Maps a site path to a file under the root. Leading `/` and `./` are
    /// ignored; paths that climb out of the root are refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::RootDir | Component::CurDir => continue,
                Component::ParentDir | Component::Prefix(_) => return err! {
                    "path leaves the site root",
                    "path" => path,
                },
            }
        }

        Ok(resolved)
    }
}

impl Fetch for FsFetch {
    fn fetch(&self, path: &str) -> Result<String> {
        let file = self.resolve(path)?;
        fs::read_to_string(&file).chain_with(|| error! {
            "failed to read site file",
            "path" => file.display(),
        })
    }
}

impl<S: BuildHasher> Fetch for HashMap<String, String, S> {
    fn fetch(&self, path: &str) -> Result<String> {
        let key = path.trim_start_matches("./").trim_start_matches('/');
        match self.get(key) {
            Some(content) => Ok(content.clone()),
            None => err!("no such resource", "path" => path),
        }
    }
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, path: &str) -> Result<String> {
        T::fetch(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_relative_to_root() {
        let site = tempfile::tempdir().unwrap();
        fs::create_dir_all(site.path().join("content")).unwrap();
        fs::write(site.path().join("content/a.md"), "# A").unwrap();

        let fetch = FsFetch::new(site.path());
        assert_eq!(fetch.fetch("content/a.md").unwrap(), "# A");
        assert_eq!(fetch.fetch("/content/a.md").unwrap(), "# A");
        assert_eq!(fetch.fetch("./content/a.md").unwrap(), "# A");
        assert!(fetch.fetch("content/missing.md").is_err());
        assert!(fetch.fetch("../etc/passwd").is_err());
    }

    #[test]
    fn maps_serve_from_memory() {
        let mut site = HashMap::new();
        site.insert("content/a.md".to_string(), "# A".to_string());

        assert_eq!(site.fetch("/content/a.md").unwrap(), "# A");
        assert!(site.fetch("content/b.md").is_err());
        assert_eq!((&site).fetch("content/a.md").unwrap(), "# A");
    }
}
