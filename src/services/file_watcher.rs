//! Input directory watcher.
//!
//! Monitors the input directory for newly created photos and forwards each
//! one as a [`Candidate`] over a bounded channel. Whether the file is
//! complete is decided downstream by the stability gate.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// File extensions accepted as photos (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Capacity of the candidate channel
pub const CHANNEL_CAPACITY: usize = 100;

/// A newly created file that looks like a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
}

/// True if `path` has one of the [`IMAGE_EXTENSIONS`].
pub fn is_image_path(path: &Path) -> bool {
    // Dot files would convert to hidden artifacts that are never served.
    let hidden = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'));
    !hidden
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

/// Paths in `event` that should become candidates.
fn candidates_from(event: Event) -> impl Iterator<Item = PathBuf> {
    let is_create = matches!(event.kind, EventKind::Create(_));
    event
        .paths
        .into_iter()
        .filter(move |path| is_create && is_image_path(path) && !path.is_dir())
}

/// Watches one directory, non-recursively. Dropping the watcher stops it
/// and closes the candidate channel.
pub struct FileWatcher {
    dir: PathBuf,
    /// Handle to the watcher (kept alive)
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Start watching `dir`, sending candidates to `sender`.
    pub fn start(dir: &Path, sender: mpsc::Sender<Candidate>) -> Result<Self, notify::Error> {
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for path in candidates_from(event) {
                        tracing::debug!(path = %path.display(), "New image detected");
                        if sender.blocking_send(Candidate { path }).is_err() {
                            tracing::debug!("Candidate channel closed");
                            return;
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %dir.display(), "Watching for new images");

        Ok(Self {
            dir: dir.to_path_buf(),
            _watcher: watcher,
        })
    }

    /// Start a watcher together with a fresh channel.
    pub fn channel(dir: &Path) -> Result<(Self, mpsc::Receiver<Candidate>), notify::Error> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Ok((Self::start(dir, tx)?, rx))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
