//! Scoped camera access

use crate::errors::CameraError;

use super::traits::{CameraDevice, FacingMode, MediaStream};

/// Exclusive hold on a camera stream
///
/// All tracks are stopped on [`CameraSession::release`] and on drop,
/// whichever comes first.
pub struct CameraSession {
    stream: Option<Box<dyn MediaStream>>,
    dimensions: (u32, u32),
}

impl CameraSession {
    /// Acquire a stream from the device
    pub async fn open<C: CameraDevice + ?Sized>(
        camera: &C,
        facing: FacingMode,
    ) -> Result<Self, CameraError> {
        let stream = camera.acquire(facing).await?;
        let dimensions = stream.dimensions();

        tracing::debug!(
            width = dimensions.0,
            height = dimensions.1,
            event = "camera_acquired",
            "Camera stream acquired"
        );

        Ok(Self {
            stream: Some(stream),
            dimensions,
        })
    }

    /// Native stream dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// The live stream, unless released
    pub fn stream_mut(&mut self) -> Option<&mut (dyn MediaStream + 'static)> {
        self.stream.as_deref_mut()
    }

    /// Whether the session still holds a live stream
    pub fn is_active(&self) -> bool {
        self.stream.as_ref().is_some_and(|stream| stream.is_active())
    }

    /// Stop all tracks; later calls are no-ops
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!(event = "camera_released", "Camera stream released");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("dimensions", &self.dimensions)
            .field("active", &self.is_active())
            .finish()
    }
}
