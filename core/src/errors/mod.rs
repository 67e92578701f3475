//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all step error types
pub use types::{CameraError, LivenessError, PhoneError, SendError, UploadError, VerifyError};

use thiserror::Error;

use crate::domain::value_objects::FlowStep;

/// Errors surfaced by the verification flow controller
///
/// Every variant leaves the controller in the step it was in before the
/// failed action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("This action requires the {expected} step, but the flow is at {actual}")]
    UnexpectedStep { expected: FlowStep, actual: FlowStep },

    // Bridge to step error types
    #[error(transparent)]
    Phone(#[from] PhoneError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Liveness(#[from] LivenessError),
}

impl FlowError {
    /// Whether the error came from the camera rather than from user input
    pub fn is_camera_unavailable(&self) -> bool {
        matches!(self, FlowError::Liveness(LivenessError::CameraUnavailable(_)))
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
