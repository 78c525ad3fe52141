pub mod artifact_store;
pub mod converter;
pub mod dispatcher;
pub mod file_watcher;
pub mod frame_library;
pub mod normalizer;
pub mod rotation;
pub mod stability_gate;
pub mod wake_schedule;

pub use artifact_store::{ArtifactStore, WriteOutcome};
pub use converter::Converter;
pub use dispatcher::{DispatchSummary, Dispatcher, Disposition};
pub use file_watcher::{Candidate, FileWatcher};
pub use frame_library::{Frame, FrameLibrary};
pub use rotation::{RotationState, RotationStatus};
pub use stability_gate::{FsProbe, GateOutcome, SizeProbe, StabilityGate};
pub use wake_schedule::wake_interval;
