use std::fs;
use std::cmp::Ordering;
use std::path::{Component, Path};

use jwalk::{DirEntry, Parallelism, WalkDir};

use crate::error::{Error, Result, ScanError};
use crate::manifest::TreeNode;
use crate::settings::Settings;
use crate::util::natural_cmp;

/// A directory whose listing is still being read.
struct Frame {
    name: String,
    path: String,
    children: Vec<TreeNode>,
}

impl Frame {
    fn into_node(self) -> TreeNode {
        TreeNode::Dir { name: self.name, path: self.path, title: None, children: self.children }
    }
}

fn attach(stack: &mut [Frame], root: &mut Vec<TreeNode>, node: TreeNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

fn close(stack: &mut Vec<Frame>, root: &mut Vec<TreeNode>) {
    if let Some(frame) = stack.pop() {
        attach(stack, root, frame.into_node());
    }
}

fn file_name(entry: &DirEntry<((), ())>) -> String {
    entry.file_name.to_string_lossy().into_owned()
}

fn dirs_first(a: &DirEntry<((), ())>, b: &DirEntry<((), ())>) -> Ordering {
    b.file_type.is_dir().cmp(&a.file_type.is_dir())
        .then_with(|| natural_cmp(&file_name(a), &file_name(b)))
}

/// `path` relative to `base`, `/`-separated.
fn relative(path: &Path, base: &Path) -> String {
    let path = path.strip_prefix(base).unwrap_or(path);
    let parts: Vec<_> = path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    parts.join("/")
}

/// Lists `dir` recursively into an untitled tree.
///
/// Hidden entries and files without a document extension are dropped. Within
/// each listing, directories precede files and both are in natural order.
/// Node paths are relative to `base`. Any read error aborts the scan.
pub fn scan_directory(dir: &Path, base: &Path, settings: &Settings) -> Result<Vec<TreeNode>> {
    match fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            let error = error!("content root is not a directory");
            return Err(error.chain(ScanError { path: dir.to_path_buf() }.into()));
        }
        Err(e) => return Err(Error::from(e).chain(ScanError { path: dir.to_path_buf() }.into())),
    }

    let rules = settings.clone();
    let walker = WalkDir::new(dir)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .process_read_dir(move |depth, _, _, children| {
            // The root itself is delivered as a listing with no depth.
            if depth.is_none() {
                return;
            }

            children.retain(|entry| match entry {
                Ok(entry) => {
                    let name = file_name(entry);
                    !rules.is_hidden(&name)
                        && (entry.file_type.is_dir() || rules.is_document(&name))
                }
                Err(_) => true,
            });

            children.sort_by(|a, b| match (a, b) {
                (Ok(a), Ok(b)) => dirs_first(a, b),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => Ordering::Equal,
            });
        });

    let mut root = vec![];
    let mut stack: Vec<Frame> = vec![];
    let (mut dirs, mut files) = (0usize, 0usize);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
                return Err(Error::from(e).chain(ScanError { path }.into()));
            }
        };

        if entry.depth == 0 {
            continue;
        }

        // Entries arrive in depth-first order: close every directory that
        // isn't an ancestor of this entry.
        while stack.len() >= entry.depth {
            close(&mut stack, &mut root);
        }

        let name = file_name(&entry);
        let path = relative(&entry.path(), base);
        if entry.file_type.is_dir() {
            dirs += 1;
            stack.push(Frame { name, path: format!("{path}/"), children: vec![] });
        } else {
            files += 1;
            attach(&mut stack, &mut root, TreeNode::File { name, path, title: None });
        }
    }

    while !stack.is_empty() {
        close(&mut stack, &mut root);
    }

    tracing::debug!(directories = dirs, documents = files, root = %dir.display(), "scanned content");
    Ok(root)
}
