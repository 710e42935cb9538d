//! The navigation and search engine: a headless document browser over a
//! loaded manifest.
//!
//! A [`Browser`] owns all session state. It changes only through its
//! mutation points: [`Browser::load()`] (or [`Browser::open()`]) and
//! [`Browser::reload()`],
//! [`Browser::navigate()`] (or [`Browser::request()`] and
//! [`Browser::complete()`]), [`Browser::search()`] and [`Browser::toggle()`].
//! The [`html`] module renders that state.

mod fetch;
mod index;
mod sidebar;
mod document;

pub mod html;

pub use fetch::{Fetch, FsFetch};
pub use index::{flatten_index, FlatIndex, FlatIndexEntry, TRAIL_SEPARATOR};
pub use sidebar::{build_sidebar, Folder, Link, Links, Sidebar, SidebarNode};
pub use document::{breadcrumb, render_document, Breadcrumb, Document, Pane};

use derive_more::Debug;

use crate::error::{Chainable, DocumentLoadError, ManifestLoadError, Result};
use crate::manifest::Manifest;
use crate::settings::Settings;

/// Default location of the manifest relative to the site.
pub const MANIFEST_PATH: &str = "manifest.json";

/// A pending document fetch. Only the most recently issued ticket's response
/// is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: u64,
    pub path: String,
}

#[derive(Debug)]
pub struct Browser<F> {
    #[debug(ignore)]
    fetch: F,
    location: String,
    extensions: Vec<String>,
    manifest: Manifest,
    index: FlatIndex,
    sidebar: Sidebar,
    current: Option<String>,
    pane: Pane,
    query: String,
    latest: u64,
}

/// Loads the manifest at `location` through `fetch`. Any failure is a
/// [`ManifestLoadError`].
pub fn load_manifest<F: Fetch>(fetch: &F, location: &str) -> Result<Manifest> {
    let error = || ManifestLoadError { location: location.into() };
    let json = fetch.fetch(location).chain_with(error)?;
    Manifest::from_json(&json).chain_with(error)
}

/// Strips the `#` from a navigation fragment and percent-decodes it.
pub fn decode_fragment(fragment: &str) -> String {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    match urlencoding::decode(fragment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => fragment.to_string(),
    }
}

impl<F: Fetch> Browser<F> {
    /// Loads the manifest from [`MANIFEST_PATH`] and builds the sidebar and
    /// index, with the default settings. Nothing is rendered until the first
    /// navigation.
    pub fn load(fetch: F) -> Result<Self> {
        Browser::open(fetch, &Settings::default())
    }

    /// Like [`Browser::load()`], reading the manifest location and the
    /// document extensions from `settings`.
    pub fn open(fetch: F, settings: &Settings) -> Result<Self> {
        let location = settings.manifest_location();
        let manifest = load_manifest(&fetch, &location)?;
        let mut browser = Browser {
            fetch,
            location,
            extensions: settings.extensions.clone(),
            index: FlatIndex::default(),
            sidebar: Sidebar::default(),
            manifest,
            current: None,
            pane: Pane::Blank,
            query: String::new(),
            latest: 0,
        };

        browser.rebuild();
        Ok(browser)
    }

    /// Fetches the manifest again and rebuilds everything derived from it.
    /// On failure the previous state is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.manifest = load_manifest(&self.fetch, &self.location)?;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.index = flatten_index(&self.manifest.tree);
        self.sidebar = build_sidebar(&self.manifest.tree);
        self.sidebar.highlight(self.current.as_deref());
        self.sidebar.filter(&self.query, &self.index);
        tracing::debug!(documents = self.index.len(), "manifest loaded");
    }

    /// Resolves `fragment` (or the default document if it's absent or empty)
    /// as the current path, renders it, and returns the resulting pane.
    pub fn navigate(&mut self, fragment: Option<&str>) -> &Pane {
        let ticket = self.request(fragment);
        let fetched = self.fetch.fetch(&ticket.path);
        self.complete(&ticket, fetched);
        &self.pane
    }

    /// The first half of a navigation: updates the current path and the
    /// active link and issues a ticket for the document fetch.
    pub fn request(&mut self, fragment: Option<&str>) -> Ticket {
        let target = fragment.map(decode_fragment).filter(|t| !t.is_empty());
        let path = target.unwrap_or_else(|| self.manifest.default_doc.clone());

        self.sidebar.highlight(Some(path.as_str()));
        self.current = Some(path.clone());
        self.latest += 1;
        Ticket { token: self.latest, path }
    }

    /// The second half of a navigation: renders the fetched document, or an
    /// error naming its path. Responses to anything but the latest ticket are
    /// dropped; returns whether the response was rendered.
    pub fn complete(&mut self, ticket: &Ticket, fetched: Result<String>) -> bool {
        if ticket.token != self.latest {
            tracing::debug!(path = %ticket.path, "discarding stale document response");
            return false;
        }

        self.pane = match fetched {
            Ok(source) => {
                let root = &self.manifest.root;
                Pane::Document(render_document(&ticket.path, &source, root, &self.extensions))
            }
            Err(e) => {
                tracing::warn!(path = %ticket.path, "document failed to load:\n{e}");
                Pane::Failed(DocumentLoadError { path: ticket.path.clone() })
            }
        };

        true
    }

    /// Filters the sidebar by `query`; see [`Sidebar::filter()`].
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.sidebar.filter(query, &self.index);
    }

    /// Expands or collapses the folder at `path`.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        self.sidebar.toggle(path)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn pane(&self) -> &Pane {
        &self.pane
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}
