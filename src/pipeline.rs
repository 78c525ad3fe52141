//! Wiring of the watch-and-convert pipeline.
//!
//! Watcher -> channel -> dispatcher (gate, worker pool) -> artifact store.

use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::models::{AppConfig, DisplaySpec};
use crate::services::{
    ArtifactStore, Converter, DispatchSummary, Dispatcher, FileWatcher, StabilityGate,
};

/// Create the input and output directories if needed.
pub fn ensure_dirs(config: &AppConfig) -> anyhow::Result<()> {
    for dir in [&config.input_dir, &config.output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(())
}

/// Converter writing to the configured output directory.
pub fn converter(config: &AppConfig) -> Converter {
    Converter::new(
        ArtifactStore::new(&config.output_dir, config.on_duplicate),
        DisplaySpec::ACEP_565,
    )
}

/// A running watcher plus its dispatcher task.
pub struct Pipeline {
    watcher: FileWatcher,
    dispatcher: JoinHandle<DispatchSummary>,
}

impl Pipeline {
    /// Must be called from within a tokio runtime.
    pub fn start(config: &AppConfig) -> anyhow::Result<Self> {
        ensure_dirs(config)?;

        let workers = config.worker_count();
        let dispatcher = Arc::new(Dispatcher::new(
            StabilityGate::new(&config.stability),
            converter(config),
            workers,
        ));
        let (watcher, candidates) = FileWatcher::channel(&config.input_dir)
            .with_context(|| format!("Failed to watch {}", config.input_dir.display()))?;

        tracing::info!(
            input = %watcher.dir().display(),
            output = %config.output_dir.display(),
            workers,
            "Conversion pipeline started"
        );

        Ok(Self {
            watcher,
            dispatcher: tokio::spawn(dispatcher.run(candidates)),
        })
    }

    /// Stop watching and wait for in-flight conversions to finish.
    pub async fn shutdown(self) -> anyhow::Result<DispatchSummary> {
        // Dropping the watcher drops the channel sender.
        drop(self.watcher);
        self.dispatcher
            .await
            .context("Dispatcher task failed")
    }
}
