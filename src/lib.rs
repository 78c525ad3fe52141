//! acep-frame: photo frame pipeline for 7-color ACeP e-paper displays
//!
//! Watches an input folder, converts each new photo into a 600x448 frame
//! buffer of palette codes and serves the results to the frame over HTTP.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod services;
