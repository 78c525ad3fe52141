//! Conversion dispatcher.
//!
//! Every candidate gets its own task that waits on the stability gate, so a
//! slow upload never holds up the ones behind it. Confirmed files are
//! converted on the blocking pool, bounded by a semaphore.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::error::ConvertError;
use crate::services::artifact_store::WriteOutcome;
use crate::services::converter::Converter;
use crate::services::file_watcher::Candidate;
use crate::services::stability_gate::{GateOutcome, StabilityGate};

/// Final state of one candidate
#[derive(Debug)]
pub enum Disposition {
    Converted(PathBuf),
    Skipped(PathBuf),
    /// Deleted before it settled
    Gone,
    Failed(ConvertError),
}

/// Tally of a dispatcher run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub gone: usize,
    pub failed: usize,
}

impl DispatchSummary {
    fn record(&mut self, disposition: &Disposition) {
        match disposition {
            Disposition::Converted(_) => self.converted += 1,
            Disposition::Skipped(_) => self.skipped += 1,
            Disposition::Gone => self.gone += 1,
            Disposition::Failed(_) => self.failed += 1,
        }
    }
}

pub struct Dispatcher {
    gate: StabilityGate,
    converter: Arc<Converter>,
    permits: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(gate: StabilityGate, converter: Converter, workers: usize) -> Self {
        Self {
            gate,
            converter: Arc::new(converter),
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Consume candidates until the channel closes, then wait for the
    /// in-flight ones to finish.
    pub async fn run(self: Arc<Self>, mut candidates: mpsc::Receiver<Candidate>) -> DispatchSummary {
        let mut tasks = JoinSet::new();
        let mut summary = DispatchSummary::default();

        loop {
            tokio::select! {
                candidate = candidates.recv() => match candidate {
                    Some(Candidate { path }) => {
                        let this = Arc::clone(&self);
                        tasks.spawn(async move { this.process(&path).await });
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::reap(joined, &mut summary);
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            Self::reap(joined, &mut summary);
        }
        tracing::info!(?summary, "Dispatcher stopped");
        summary
    }

    fn reap(joined: Result<Disposition, tokio::task::JoinError>, summary: &mut DispatchSummary) {
        match joined {
            Ok(disposition) => summary.record(&disposition),
            Err(e) => {
                tracing::error!(error = %e, "Candidate task panicked");
                summary.failed += 1;
            }
        }
    }

    /// Gate, convert and log one candidate. Never fails; errors end up in
    /// the returned [`Disposition`].
    pub async fn process(&self, path: &Path) -> Disposition {
        let disposition = match self.gate.wait(path).await {
            Ok(GateOutcome::Stable { .. }) => match self.convert(path).await {
                Ok(WriteOutcome::Written(dest)) => Disposition::Converted(dest),
                Ok(WriteOutcome::Skipped(dest)) => Disposition::Skipped(dest),
                Err(e) => Disposition::Failed(e),
            },
            Ok(GateOutcome::Timeout { polls }) => Disposition::Failed(ConvertError::Timeout {
                path: path.to_path_buf(),
                polls,
            }),
            Ok(GateOutcome::Gone) => Disposition::Gone,
            Err(e) => Disposition::Failed(e.into()),
        };

        match &disposition {
            Disposition::Failed(e) => {
                tracing::error!(path = %path.display(), error = %e, "Conversion failed")
            }
            Disposition::Gone => {
                tracing::info!(path = %path.display(), "File removed before it settled")
            }
            _ => {}
        }
        disposition
    }

    /// Convert a file that is known to be complete, on the blocking pool.
    pub async fn convert(&self, path: &Path) -> Result<WriteOutcome, ConvertError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ConvertError::Worker(e.to_string()))?;

        let converter = Arc::clone(&self.converter);
        let input = path.to_path_buf();
        tokio::task::spawn_blocking(move || converter.convert(&input))
            .await
            .map_err(|e| ConvertError::Worker(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplaySpec, DuplicatePolicy, StabilityConfig};
    use crate::services::artifact_store::ArtifactStore;
    use image::{Rgb, RgbImage};

    fn dispatcher(out: &Path, workers: usize) -> Dispatcher {
        let gate = StabilityGate::new(&StabilityConfig {
            poll_interval_ms: 5,
            max_polls: 20,
        });
        let converter = Converter::new(
            ArtifactStore::new(out, DuplicatePolicy::Overwrite),
            DisplaySpec { width: 6, height: 4 },
        );
        Dispatcher::new(gate, converter, workers)
    }

    #[tokio::test]
    async fn test_process_converts_stable_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blue.png");
        RgbImage::from_pixel(3, 3, Rgb([0, 0, 255])).save(&input).unwrap();

        let disposition = dispatcher(dir.path(), 2).process(&input).await;

        match disposition {
            Disposition::Converted(dest) => assert_eq!(dest, dir.path().join("blue.h")),
            other => panic!("Expected Converted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_process_missing_file_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let disposition = dispatcher(dir.path(), 1)
            .process(&dir.path().join("ghost.png"))
            .await;
        assert!(matches!(disposition, Disposition::Gone));
    }

    #[tokio::test]
    async fn test_process_broken_file_fails_in_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        std::fs::write(&input, b"nope").unwrap();

        let disposition = dispatcher(dir.path(), 1).process(&input).await;
        assert!(matches!(disposition, Disposition::Failed(ConvertError::Decode(_))));
    }

    #[tokio::test]
    async fn test_run_drains_channel_and_tallies() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let bad = dir.path().join("bad.jpg");
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])).save(&good).unwrap();
        std::fs::write(&bad, b"nope").unwrap();

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(Arc::new(dispatcher(dir.path(), 1)).run(rx));
        for path in [good, bad, dir.path().join("gone.png")] {
            tx.send(Candidate { path }).await.unwrap();
        }
        drop(tx);

        let summary = handle.await.unwrap();
        assert_eq!(
            summary,
            DispatchSummary {
                converted: 1,
                skipped: 0,
                gone: 1,
                failed: 1,
            }
        );
    }
}
