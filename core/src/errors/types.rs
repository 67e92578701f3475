//! Error types for each verification step
//!
//! Display strings are the user-facing messages surfaced at the step boundary.

use thiserror::Error;

use crate::domain::value_objects::LivenessStatus;

/// Phone number rejected by the validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Invalid phone number format. Please use E.164 format (e.g., +91XXXXXXXXXX).")]
    InvalidFormat { phone: String },
}

/// Failure to issue an OTP challenge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Invalid phone number format. Please use E.164 format (e.g., +91XXXXXXXXXX).")]
    InvalidFormat,

    #[error("An error occurred while sending the OTP: {message}")]
    Transport { message: String },
}

impl From<PhoneError> for SendError {
    fn from(_: PhoneError) -> Self {
        SendError::InvalidFormat
    }
}

/// Failure to verify an OTP code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Invalid or expired OTP. Please try again.")]
    InvalidOrExpired,

    #[error("An error occurred while verifying the OTP: {message}")]
    Transport { message: String },
}

/// Upload precondition or transport failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Invalid authentication token.")]
    InvalidToken,

    #[error("Invalid image data.")]
    InvalidImage,

    #[error("Upload failed: {message}")]
    Transport { message: String },
}

/// Camera permission, hardware or stream failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera access was denied. Please enable camera permissions in your browser settings.")]
    PermissionDenied,

    #[error("No front-facing camera is available on this device.")]
    NotFound,

    #[error("The camera is already in use by another capture session.")]
    Busy,

    #[error("Camera stream error: {message}")]
    Stream { message: String },
}

/// Errors raised by the liveness capture engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LivenessError {
    #[error("This action is not available while the liveness check is {status}")]
    NotReady { status: LivenessStatus },

    #[error("Could not access the camera. {0}")]
    CameraUnavailable(#[from] CameraError),

    #[error("Liveness check failed: {reason}")]
    Rejected { reason: String },

    #[error("Failed to encode the captured frame: {message}")]
    Encoding { message: String },

    #[error("Failed to upload selfie. {0}")]
    Upload(#[from] UploadError),
}
