use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Folder watched for new photos
    pub input_dir: PathBuf,

    /// Folder receiving the converted `.h` frame listings
    pub output_dir: PathBuf,

    /// Write-completion detection settings
    pub stability: StabilityConfig,

    /// Maximum concurrent conversions (defaults to available parallelism)
    pub workers: Option<usize>,

    /// What to do when an output file with the same name already exists
    pub on_duplicate: DuplicatePolicy,

    /// Daily window during which the frame wakes up hourly
    pub wake_window: WakeWindow,
}

/// Settings for the stability gate
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct StabilityConfig {
    /// Delay between two size samples
    pub poll_interval_ms: u64,

    /// Give up on a file that is still growing after this many polls
    pub max_polls: u32,
}

impl StabilityConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Poll budget for one file. At least one poll is needed to compare two
    /// samples, so `max_polls: 0` is treated as 1.
    pub fn poll_limit(&self) -> u32 {
        self.max_polls.max(1)
    }
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_polls: 120,
        }
    }
}

/// Policy for two inputs that share a base name (`cat.png`, `cat.jpg`)
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Last writer wins
    #[default]
    Overwrite,
    /// Keep the existing output, drop the new one
    Skip,
    /// Write `<name>-1.h`, `<name>-2.h`, ...
    Version,
}

/// Daily wake window, in local hours
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WakeWindow {
    /// First hour of the window (inclusive)
    pub start_hour: u32,

    /// Hour the window closes (exclusive)
    pub end_hour: u32,

    /// Wake interval inside the window, in seconds
    pub interval_secs: u64,
}

impl Default for WakeWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
            interval_secs: 3600,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        input = %config.input_dir.display(),
                        output = %config.output_dir.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `INPUT_DIR` / `OUTPUT_DIR` style overrides.
    ///
    /// Takes a lookup function so tests do not have to touch the process
    /// environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        self
    }

    /// Worker pool size, at least 1.
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./images"),
            output_dir: PathBuf::from("./h_files"),
            stability: StabilityConfig::default(),
            workers: None,
            on_duplicate: DuplicatePolicy::default(),
            wake_window: WakeWindow::default(),
        }
    }
}
