#![doc = svgbobdoc::transform!(
//! Static documentation publishing: a manifest builder and a document
//! browser.
//!
//! # Overview
//!
//! Quire turns a directory of markdown files into a browsable site in two
//! stages that share nothing but a file:
//!
//! ```svgbob
//!  +-----------+   scan    +---------+  emit   +---------------+
//!  | content/  |---------->| Builder |-------->| manifest.json |
//!  +-----------+           +----+----+         +-------+-------+
//!        ^                      ^                      |
//!        |        watch         |                      | fetch
//!        +----------------------+                      v
//!                                              +---------------+
//!                                 documents -->|    Browser    |
//!                                              +-------+-------+
//!                                                      |
//!                                   +------------------+------------------+
//!                                   |                  |                  |
//!                              +----+----+      +------+-----+      +-----+----+
//!                              | Sidebar |      | FlatIndex  |      |   Pane   |
//!                              +---------+      +------------+      +----------+
//! ```
//!
//!   * The [`builder`] walks the content root, keeping only markdown
//!     documents and skipping hidden entries, titles every node, picks a
//!     default document and writes a [`manifest::Manifest`] as JSON. In watch
//!     mode it regenerates the manifest after every change.
//!
//!   * The [`engine`] loads that manifest through a [`engine::Fetch`]
//!     implementation and keeps a session: a collapsible sidebar mirroring
//!     the tree, a flat search index, the current document rendered from
//!     markdown with highlighted code, and its breadcrumb.
//!
//! Both stages are configured by an optional `quire.toml`; see
//! [`settings::Settings`].
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod settings;
pub mod manifest;
pub mod builder;
pub mod markdown;
pub mod engine;

pub use builder::Builder;
pub use engine::Browser;
pub use manifest::{Manifest, TreeNode};
pub use settings::Settings;
