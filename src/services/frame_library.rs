use std::io;

use tokio::sync::Mutex;

use crate::services::artifact_store::ArtifactStore;
use crate::services::rotation::{RotationState, RotationStatus};

/// A converted frame ready to be sent to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Serves artifacts from the output directory in rotation order.
pub struct FrameLibrary {
    store: ArtifactStore,
    rotation: Mutex<RotationState>,
}

impl FrameLibrary {
    pub fn new(store: ArtifactStore, rotation: RotationState) -> Self {
        Self {
            store,
            rotation: Mutex::new(rotation),
        }
    }

    /// Next frame in the rotation, `None` if nothing has been converted yet.
    pub async fn next_frame(&self) -> io::Result<Option<Frame>> {
        let name = {
            let mut rotation = self.rotation.lock().await;
            let mut scan_error = None;
            let name = rotation.next(|| match self.store.list() {
                Ok(names) => names,
                Err(e) => {
                    scan_error = Some(e);
                    Vec::new()
                }
            });
            if let Some(e) = scan_error {
                return Err(e);
            }
            name
        };

        let Some(name) = name else {
            return Ok(None);
        };
        let path = self
            .store
            .path_of(&name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.clone()))?;
        let contents = tokio::fs::read(&path).await?;

        tracing::info!(frame = %name, bytes = contents.len(), "Sending frame");
        Ok(Some(Frame { name, contents }))
    }

    /// Queue newly converted frames and report the rotation counters.
    pub async fn status(&self) -> io::Result<RotationStatus> {
        let available = self.store.list()?;
        let mut rotation = self.rotation.lock().await;
        rotation.refresh(available);
        Ok(rotation.status())
    }
}
