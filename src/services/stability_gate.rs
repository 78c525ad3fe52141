//! Write-completion detection for incoming photos.
//!
//! A creation event fires as soon as a file appears, usually long before the
//! writer is done with it. The gate samples the file size on a fixed interval
//! and only lets the file through once two consecutive samples agree.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::StabilityConfig;

/// Source of file size samples.
pub trait SizeProbe: Send + Sync {
    fn size(&self, path: &Path) -> io::Result<u64>;
}

/// Reads sizes from filesystem metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl SizeProbe for FsProbe {
    fn size(&self, path: &Path) -> io::Result<u64> {
        std::fs::metadata(path).map(|m| m.len())
    }
}

/// Result of waiting on a candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Two consecutive samples matched
    Stable { size: u64 },
    /// Still changing after the poll budget ran out
    Timeout { polls: u32 },
    /// The file disappeared while being watched
    Gone,
}

/// A candidate being watched by one gate wait.
#[derive(Debug)]
struct PendingFile {
    path: PathBuf,
    size: u64,
    observed_at: Instant,
}

#[derive(Clone)]
pub struct StabilityGate {
    probe: Arc<dyn SizeProbe>,
    poll_interval: Duration,
    max_polls: u32,
}

impl StabilityGate {
    pub fn new(config: &StabilityConfig) -> Self {
        Self::with_probe(Arc::new(FsProbe), config)
    }

    pub fn with_probe(probe: Arc<dyn SizeProbe>, config: &StabilityConfig) -> Self {
        Self {
            probe,
            poll_interval: config.poll_interval(),
            max_polls: config.poll_limit(),
        }
    }

    /// Wait until `path` stops changing size.
    ///
    /// Errors other than "not found" are returned as-is and abort the wait.
    pub async fn wait(&self, path: &Path) -> io::Result<GateOutcome> {
        let first = match self.sample(path)? {
            Some(size) => size,
            None => return Ok(GateOutcome::Gone),
        };
        let started = Instant::now();
        let mut pending = PendingFile {
            path: path.to_path_buf(),
            size: first,
            observed_at: started,
        };

        let mut polls = 0;
        while polls < self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            polls += 1;

            let Some(size) = self.sample(&pending.path)? else {
                tracing::debug!(path = %pending.path.display(), polls, "Candidate vanished");
                return Ok(GateOutcome::Gone);
            };

            if size == pending.size {
                tracing::debug!(
                    path = %pending.path.display(),
                    size,
                    polls,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "File is stable"
                );
                return Ok(GateOutcome::Stable { size });
            }

            tracing::trace!(
                path = %pending.path.display(),
                from = pending.size,
                to = size,
                since_ms = pending.observed_at.elapsed().as_millis() as u64,
                "File still growing"
            );
            pending.size = size;
            pending.observed_at = Instant::now();
        }

        Ok(GateOutcome::Timeout { polls })
    }

    fn sample(&self, path: &Path) -> io::Result<Option<u64>> {
        match self.probe.size(path) {
            Ok(size) => Ok(Some(size)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
