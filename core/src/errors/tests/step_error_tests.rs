//! Unit tests for step error messages and conversions

use crate::domain::value_objects::{FlowStep, LivenessStatus};
use crate::errors::{
    CameraError, FlowError, LivenessError, PhoneError, SendError, UploadError, VerifyError,
};

#[test]
fn test_phone_error_message_does_not_echo_input() {
    let error = PhoneError::InvalidFormat {
        phone: "+911234567890".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("Invalid phone number format"));
    assert!(!message.contains("+911234567890"));
}

#[test]
fn test_phone_error_converts_to_send_invalid_format() {
    let error: SendError = PhoneError::InvalidFormat { phone: "x".to_string() }.into();
    assert_eq!(error, SendError::InvalidFormat);
}

#[test]
fn test_verify_error_message() {
    assert_eq!(
        VerifyError::InvalidOrExpired.to_string(),
        "Invalid or expired OTP. Please try again."
    );
}

#[test]
fn test_upload_error_messages() {
    assert_eq!(UploadError::InvalidToken.to_string(), "Invalid authentication token.");
    assert_eq!(UploadError::InvalidImage.to_string(), "Invalid image data.");
}

#[test]
fn test_liveness_upload_error_wraps_reason() {
    let error: LivenessError = UploadError::InvalidImage.into();
    assert_eq!(error.to_string(), "Failed to upload selfie. Invalid image data.");
}

#[test]
fn test_liveness_not_ready_names_status() {
    let error = LivenessError::NotReady { status: LivenessStatus::Checking };
    assert!(error.to_string().contains("checking"));
}

#[test]
fn test_flow_error_is_transparent_for_step_errors() {
    let error: FlowError = VerifyError::InvalidOrExpired.into();
    assert_eq!(error.to_string(), VerifyError::InvalidOrExpired.to_string());
}

#[test]
fn test_flow_error_unexpected_step_message() {
    let error = FlowError::UnexpectedStep {
        expected: FlowStep::OtpEntry,
        actual: FlowStep::PhoneEntry,
    };
    assert_eq!(
        error.to_string(),
        "This action requires the otp_entry step, but the flow is at phone_entry"
    );
}

#[test]
fn test_camera_unavailable_detection() {
    let error: FlowError = LivenessError::from(CameraError::PermissionDenied).into();
    assert!(error.is_camera_unavailable());
    assert!(!FlowError::from(SendError::InvalidFormat).is_camera_unavailable());
}
