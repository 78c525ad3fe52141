//! Shuffled, non-repeating frame rotation.
//!
//! Every converted frame is handed out once per cycle in random order.
//! When the cycle is exhausted the full set is reloaded and reshuffled.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use utoipa::ToSchema;

/// Rotation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RotationStatus {
    /// Frames not yet sent in the current cycle
    pub remaining_files: usize,
    /// Frames already sent in the current cycle
    pub sent_files: usize,
}

#[derive(Debug)]
pub struct RotationState<R: Rng = StdRng> {
    remaining: Vec<String>,
    sent: Vec<String>,
    rng: R,
}

impl RotationState<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RotationState<R> {
    pub fn new(rng: R) -> Self {
        Self {
            remaining: Vec::new(),
            sent: Vec::new(),
            rng,
        }
    }

    /// Pick up frames that appeared since the last call.
    ///
    /// Names already remaining or sent this cycle are left alone, so a
    /// refresh never re-queues a frame that was just shown.
    pub fn refresh(&mut self, available: Vec<String>) {
        let before = self.remaining.len();
        for name in available {
            if !self.remaining.contains(&name) && !self.sent.contains(&name) {
                self.remaining.push(name);
            }
        }
        if self.remaining.len() != before {
            tracing::debug!(added = self.remaining.len() - before, "New frames queued");
        }
        self.remaining.shuffle(&mut self.rng);
    }

    /// Next frame to show.
    ///
    /// When the cycle is exhausted, `scan` is called for the complete set
    /// of frames, which becomes the new cycle. Returns `None` only if
    /// there are no frames at all.
    pub fn next<F>(&mut self, scan: F) -> Option<String>
    where
        F: FnOnce() -> Vec<String>,
    {
        if self.remaining.is_empty() {
            self.remaining = scan();
            self.remaining.shuffle(&mut self.rng);
            self.sent.clear();
            tracing::debug!(frames = self.remaining.len(), "Starting new rotation cycle");
        }

        let name = self.remaining.pop()?;
        self.sent.push(name.clone());
        Some(name)
    }

    pub fn status(&self) -> RotationStatus {
        RotationStatus {
            remaining_files: self.remaining.len(),
            sent_files: self.sent.len(),
        }
    }
}
