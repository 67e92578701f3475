//! Traits for camera access and liveness analysis

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CameraError;

use super::frame::Frame;

/// Which camera to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front camera, facing the user
    #[default]
    User,
    /// Rear camera
    Environment,
}

/// A live video stream from a camera
///
/// Implementations hold the camera until [`MediaStream::stop`] is called or
/// the stream is dropped.
pub trait MediaStream: Send {
    /// Native frame dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Grab the current frame as packed RGB at native dimensions
    fn grab_frame(&mut self) -> Result<Frame, CameraError>;

    /// Stop all tracks and release the camera
    fn stop(&mut self);

    /// Whether any track is still live
    fn is_active(&self) -> bool;
}

/// Trait for camera hardware integration
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Request exclusive access to a camera stream
    async fn acquire(&self, facing: FacingMode) -> Result<Box<dyn MediaStream>, CameraError>;
}

/// Outcome of a liveness analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LivenessVerdict {
    /// A live person is present
    Passed,
    /// Liveness could not be confirmed
    Rejected { reason: String },
}

/// Trait for liveness analysis over a live stream
#[async_trait]
pub trait LivenessAnalyzer: Send + Sync {
    /// Analyze the stream until a verdict is reached
    async fn analyze(&self, stream: &mut dyn MediaStream) -> LivenessVerdict;
}
