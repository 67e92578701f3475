//! Settings for the verification steps: OTP, selfie upload and liveness capture

use serde::{Deserialize, Serialize};

/// Code accepted by every challenge in the simulated environment
pub const DEFAULT_FIXED_CODE: &str = "123456";

/// OTP issuance and verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Simulated latency of the send round-trip in milliseconds
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    /// Simulated latency of the verify round-trip in milliseconds
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,

    /// Universal code accepted for every phone number. Absent or blank
    /// switches to per-phone issued challenges.
    #[serde(default = "default_fixed_code")]
    pub fixed_code: Option<String>,

    /// Lifetime of an issued challenge in seconds
    #[serde(default = "default_challenge_ttl_seconds")]
    pub challenge_ttl_seconds: i64,

    /// Backend endpoint the send call is addressed to
    #[serde(default = "default_send_endpoint")]
    pub send_endpoint: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: default_send_delay_ms(),
            verify_delay_ms: default_verify_delay_ms(),
            fixed_code: default_fixed_code(),
            challenge_ttl_seconds: default_challenge_ttl_seconds(),
            send_endpoint: default_send_endpoint(),
        }
    }
}

impl OtpConfig {
    /// Whether codes are issued per phone instead of the universal fixed code
    pub fn uses_issued_challenges(&self) -> bool {
        self.accepted_fixed_code().is_none()
    }

    /// The universal code, treating a blank value as unset
    ///
    /// Environment overrides cannot express a missing value, so
    /// `LID__OTP__FIXED_CODE=""` selects issued challenges.
    pub fn accepted_fixed_code(&self) -> Option<&str> {
        self.fixed_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Check that a configured fixed code is a 6-digit code
    pub fn validate(&self) -> Result<(), String> {
        match self.accepted_fixed_code() {
            Some(code) if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) => Err(
                format!("otp.fixed_code must be 6 digits, got {:?}", code),
            ),
            _ => Ok(()),
        }
    }
}

/// Selfie upload configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Simulated latency of the upload round-trip in milliseconds
    #[serde(default = "default_upload_delay_ms")]
    pub delay_ms: u64,

    /// Reference returned for every accepted upload
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Pixel width of the placeholder image
    #[serde(default = "default_placeholder_width")]
    pub placeholder_width: u32,

    /// Pixel height of the placeholder image
    #[serde(default = "default_placeholder_height")]
    pub placeholder_height: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_upload_delay_ms(),
            placeholder_url: default_placeholder_url(),
            placeholder_width: default_placeholder_width(),
            placeholder_height: default_placeholder_height(),
        }
    }
}

/// Liveness capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LivenessConfig {
    /// Length of the timed liveness confirmation window in milliseconds
    #[serde(default = "default_check_duration_ms")]
    pub check_duration_ms: u64,

    /// JPEG quality (1-100) used when encoding the captured frame
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            check_duration_ms: default_check_duration_ms(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_send_delay_ms() -> u64 {
    1000
}

fn default_verify_delay_ms() -> u64 {
    1500
}

fn default_fixed_code() -> Option<String> {
    Some(DEFAULT_FIXED_CODE.to_string())
}

fn default_challenge_ttl_seconds() -> i64 {
    300 // 5 minutes
}

fn default_send_endpoint() -> String {
    String::from("POST /mobile/sendOTP")
}

fn default_upload_delay_ms() -> u64 {
    2000
}

fn default_placeholder_url() -> String {
    String::from("https://placehold.co/480x640.png")
}

fn default_placeholder_width() -> u32 {
    480
}

fn default_placeholder_height() -> u32 {
    640
}

fn default_check_duration_ms() -> u64 {
    2000
}

fn default_jpeg_quality() -> u8 {
    92
}
