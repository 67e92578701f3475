//! Liveness capture module
//!
//! This module drives the camera side of verification:
//! - Exclusive front camera acquisition scoped to a [`CameraSession`]
//! - A pluggable liveness analysis step, timed by default
//! - Frame capture encoded as a baseline JPEG data URI
//! - Hand-off to the upload service with the camera already released

mod config;
mod engine;
mod frame;
mod session;
mod timed;
mod traits;

#[cfg(test)]
mod tests;

pub use config::LivenessEngineConfig;
pub use engine::LivenessCaptureEngine;
pub use frame::{encode_frame, Frame};
pub use session::CameraSession;
pub use timed::TimedLivenessCheck;
pub use traits::{CameraDevice, FacingMode, LivenessAnalyzer, LivenessVerdict, MediaStream};
