use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};

use crate::builder::Builder;
use crate::error::{Chainable, Result};

/// Change notifications for a directory tree.
pub struct Watcher {
    // Dropping the watcher stops notifications.
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<notify::Result<Event>>,
}

impl Watcher {
    pub fn new(root: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(root, RecursiveMode::Recursive).chain_with(|| error! {
            "failed to watch directory",
            "path" => root.display(),
        })?;

        Ok(Watcher { _watcher: watcher, rx })
    }

    /// Blocks until the next change. Returns `None` once the watcher is gone.
    pub fn next_event(&self) -> Option<notify::Result<Event>> {
        self.rx.recv().ok()
    }

    pub fn next_event_timeout(&self, timeout: Duration) -> Option<notify::Result<Event>> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Reads don't change the tree, and rebuilding reads it.
pub(crate) fn is_change(event: &Event) -> bool {
    !matches!(event.kind, EventKind::Access(_))
}

/// Outcome of the rebuilds performed by [`Builder::run()`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rebuilds {
    pub succeeded: usize,
    pub failed: usize,
}

impl Builder {
    /// Regenerates the manifest after every change under the content root.
    /// A failed rebuild is logged and watching continues.
    pub fn watch(&self) -> Result<()> {
        let watcher = Watcher::new(&self.content_dir())?;
        tracing::info!(path = %self.content_dir().display(), "watching for changes");

        let rebuilds = self.run(std::iter::from_fn(|| watcher.next_event()));
        tracing::info!(succeeded = rebuilds.succeeded, failed = rebuilds.failed, "watcher closed");
        Ok(())
    }

    /// Rebuilds once for every change in `events`, until they run out.
    pub fn run<I>(&self, events: I) -> Rebuilds
        where I: IntoIterator<Item = notify::Result<Event>>
    {
        let mut rebuilds = Rebuilds::default();
        for event in events {
            match event {
                Ok(event) if is_change(&event) => {
                    if self.rebuild(&event) {
                        rebuilds.succeeded += 1;
                    } else {
                        rebuilds.failed += 1;
                    }
                }
                Ok(_) => continue,
                Err(e) => tracing::warn!("watch error: {e}"),
            }
        }

        rebuilds
    }

    fn rebuild(&self, event: &Event) -> bool {
        tracing::debug!(kind = ?event.kind, paths = ?event.paths, "content changed");
        match self.generate() {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("rebuild failed:\n{e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reports_changes() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = Watcher::new(dir.path()).unwrap();
        fs::write(dir.path().join("new.md"), "# New").unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let mut seen = false;
        while !seen && std::time::Instant::now() < deadline {
            if let Some(Ok(event)) = watcher.next_event_timeout(Duration::from_millis(500)) {
                seen = is_change(&event);
            }
        }

        assert!(seen);
    }

    #[test]
    fn changes_rebuild_and_failures_do_not_stop_the_loop() {
        use notify::event::{AccessKind, ModifyKind};

        let project = tempfile::tempdir().unwrap();
        let builder = Builder::discover(project.path()).unwrap();
        builder.generate().unwrap();

        let content = builder.content_dir();
        let manifest = builder.manifest_path();
        let documents = || {
            let json = fs::read_to_string(&manifest).unwrap();
            crate::manifest::Manifest::from_json(&json).unwrap().documents().count()
        };

        // Reads never rebuild; a change does.
        fs::write(content.join("added.md"), "# Added").unwrap();
        let rebuilds = builder.run(vec![
            Ok(Event::new(EventKind::Access(AccessKind::Any))),
            Ok(Event::new(EventKind::Modify(ModifyKind::Any))),
        ]);
        assert_eq!(rebuilds, Rebuilds { succeeded: 1, failed: 0 });
        assert_eq!(documents(), 2);

        // Break the content root, then repair it, within one watch session.
        let stash = project.path().join("stash");
        let mut step = 0;
        let events = std::iter::from_fn(|| {
            step += 1;
            match step {
                1 => {
                    fs::rename(&content, &stash).unwrap();
                    fs::write(&content, "not a directory").unwrap();
                }
                2 => {
                    assert_eq!(documents(), 2);
                    fs::remove_file(&content).unwrap();
                    fs::rename(&stash, &content).unwrap();
                    fs::write(content.join("later.md"), "# Later").unwrap();
                }
                _ => return None,
            }

            Some(Ok(Event::new(EventKind::Modify(ModifyKind::Any))))
        });

        assert_eq!(builder.run(events), Rebuilds { succeeded: 1, failed: 1 });
        assert_eq!(documents(), 3);
    }

    #[test]
    fn access_is_not_a_change() {
        use notify::event::{AccessKind, CreateKind};

        assert!(!is_change(&Event::new(EventKind::Access(AccessKind::Any))));
        assert!(is_change(&Event::new(EventKind::Create(CreateKind::File))));
    }
}
