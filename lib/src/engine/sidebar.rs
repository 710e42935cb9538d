use crate::engine::index::FlatIndex;
use crate::manifest::TreeNode;

/// The renderable sidebar: a mirror of the manifest tree plus view state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub nodes: Vec<SidebarNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarNode {
    Folder(Folder),
    Link(Link),
}

/// A directory toggle and the container of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub title: String,
    pub path: String,
    pub expanded: bool,
    pub children: Vec<SidebarNode>,
}

/// A navigable document link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub path: String,
    pub active: bool,
    /// Set when the link's list item is filtered out by a search.
    pub hidden: bool,
}

/// Builds the sidebar for `tree`: every folder collapsed, nothing active,
/// nothing hidden.
pub fn build_sidebar(tree: &[TreeNode]) -> Sidebar {
    fn build(tree: &[TreeNode]) -> Vec<SidebarNode> {
        tree.iter()
            .map(|node| match node {
                TreeNode::Dir { path, children, .. } => SidebarNode::Folder(Folder {
                    title: node.title().to_string(),
                    path: path.clone(),
                    expanded: false,
                    children: build(children),
                }),
                TreeNode::File { path, .. } => SidebarNode::Link(Link {
                    label: node.title().to_string(),
                    path: path.clone(),
                    active: false,
                    hidden: false,
                }),
            })
            .collect()
    }

    Sidebar { nodes: build(tree) }
}

impl Sidebar {
    /// All links in depth-first order.
    pub fn links(&self) -> Links<'_> {
        Links { stack: vec![self.nodes.iter()] }
    }

    fn for_each_link_mut<F: FnMut(&mut Link)>(&mut self, mut f: F) {
        let mut stack = vec![self.nodes.iter_mut()];
        while let Some(iter) = stack.last_mut() {
            match iter.next() {
                Some(SidebarNode::Folder(folder)) => stack.push(folder.children.iter_mut()),
                Some(SidebarNode::Link(link)) => f(link),
                None => { stack.pop(); }
            }
        }
    }

    /// Flips the folder at `path`. Returns whether it is now expanded, or
    /// `None` if there's no such folder.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        fn go(nodes: &mut [SidebarNode], path: &str) -> Option<bool> {
            for node in nodes {
                if let SidebarNode::Folder(folder) = node {
                    if folder.path == path {
                        folder.expanded = !folder.expanded;
                        return Some(folder.expanded);
                    }

                    if let Some(expanded) = go(&mut folder.children, path) {
                        return Some(expanded);
                    }
                }
            }

            None
        }

        go(&mut self.nodes, path)
    }

    /// Marks the link to `current`, and only that link, as active.
    pub fn highlight(&mut self, current: Option<&str>) {
        self.for_each_link_mut(|link| link.active = Some(&*link.path) == current);
    }

    /// Hides every link whose label and hierarchy text don't contain `query`.
    /// The query is trimmed and lowercased first; an empty query shows every
    /// link. Folders are never hidden.
    pub fn filter(&mut self, query: &str, index: &FlatIndex) {
        let query = query.trim().to_lowercase();
        self.for_each_link_mut(|link| {
            if query.is_empty() {
                link.hidden = false;
                return;
            }

            let hierarchy = index.get(&link.path).map_or("", |e| &*e.hierarchy_text);
            let haystack = format!("{} {}", link.label, hierarchy).to_lowercase();
            link.hidden = !haystack.contains(&query);
        });
    }

    pub fn active(&self) -> Option<&Link> {
        self.links().find(|link| link.active)
    }
}

pub struct Links<'a> {
    stack: Vec<std::slice::Iter<'a, SidebarNode>>,
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a Link;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.last_mut()?.next() {
                Some(SidebarNode::Folder(folder)) => self.stack.push(folder.children.iter()),
                Some(SidebarNode::Link(link)) => return Some(link),
                None => { self.stack.pop(); }
            }
        }
    }
}
