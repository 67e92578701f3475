//! Step and status enumerations of the verification state machines

use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of the verification flow, in forward order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// Waiting for a phone number
    PhoneEntry,
    /// Waiting for the one-time code sent to the phone number
    OtpEntry,
    /// Liveness check and selfie capture
    LivenessCheck,
    /// Verification finished; only reset is possible
    Complete,
}

impl FlowStep {
    /// Get the step name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStep::PhoneEntry => "phone_entry",
            FlowStep::OtpEntry => "otp_entry",
            FlowStep::LivenessCheck => "liveness_check",
            FlowStep::Complete => "complete",
        }
    }

    /// Title shown to the user for this step
    pub fn title(&self) -> &'static str {
        match self {
            FlowStep::PhoneEntry => "Enter Your Phone Number",
            FlowStep::OtpEntry => "Verify OTP",
            FlowStep::LivenessCheck => "Liveness & Selfie Capture",
            FlowStep::Complete => "Verification Successful",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a liveness capture engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivenessStatus {
    /// Camera is live, waiting for the user to confirm readiness
    Pending,
    /// Liveness confirmation window is running
    Checking,
    /// Liveness confirmed; a selfie may be captured
    Passed,
    /// Frame captured, upload in flight
    Uploading,
    /// Upload accepted; the engine is finished
    Completed,
    /// Camera could not be acquired; the engine must be restarted
    ErrorAcquiringCamera,
}

impl LivenessStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LivenessStatus::Pending => "pending",
            LivenessStatus::Checking => "checking",
            LivenessStatus::Passed => "passed",
            LivenessStatus::Uploading => "uploading",
            LivenessStatus::Completed => "completed",
            LivenessStatus::ErrorAcquiringCamera => "error_acquiring_camera",
        }
    }

    /// Whether no further transition is possible on this engine
    pub fn is_terminal(&self) -> bool {
        matches!(self, LivenessStatus::Completed | LivenessStatus::ErrorAcquiringCamera)
    }
}

impl fmt::Display for LivenessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
