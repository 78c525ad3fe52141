pub mod config;
pub mod display_spec;

pub use config::{AppConfig, DuplicatePolicy, StabilityConfig, WakeWindow};
pub use display_spec::DisplaySpec;
