use std::path::Path;
use std::time::Instant;

use acep_dither::{FloydSteinberg, Palette, QuantizedRaster};

use crate::error::ConvertError;
use crate::models::DisplaySpec;
use crate::services::artifact_store::{ArtifactStore, WriteOutcome};
use crate::services::normalizer;

/// Turns one photo into one frame artifact.
///
/// Conversion is CPU bound and synchronous; callers on the async runtime
/// should run it via `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct Converter {
    store: ArtifactStore,
    spec: DisplaySpec,
}

impl Converter {
    pub fn new(store: ArtifactStore, spec: DisplaySpec) -> Self {
        Self { store, spec }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Decode, resize and dither `input` without writing anything.
    pub fn render(&self, input: &Path) -> Result<QuantizedRaster, ConvertError> {
        let mut raster = normalizer::normalize_file(input, self.spec)?;
        Ok(FloydSteinberg.dither(&mut raster, Palette::acep()))
    }

    /// Full pipeline: render, encode the listing and store it.
    pub fn convert(&self, input: &Path) -> Result<WriteOutcome, ConvertError> {
        let started = Instant::now();
        let quantized = self.render(input)?;
        let outcome = self.store.write(input, &quantized.to_listing())?;

        match &outcome {
            WriteOutcome::Written(dest) => tracing::info!(
                input = %input.display(),
                output = %dest.display(),
                pixels = quantized.codes().len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Converted image"
            ),
            WriteOutcome::Skipped(dest) => tracing::info!(
                input = %input.display(),
                existing = %dest.display(),
                "Artifact already exists, skipped"
            ),
        }
        Ok(outcome)
    }
}
