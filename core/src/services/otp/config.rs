//! Configuration for the OTP service

use std::time::Duration;

use lid_shared::config::verification::{OtpConfig, DEFAULT_FIXED_CODE};

/// How challenges are satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeMode {
    /// Every challenge accepts this code, for every phone number. Nothing is delivered.
    FixedCode(String),
    /// Each send generates and delivers a random code bound to the phone number
    Issued,
}

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Simulated latency of a send round-trip
    pub send_delay: Duration,
    /// Simulated latency of a verify round-trip
    pub verify_delay: Duration,
    /// How challenges are satisfied
    pub mode: ChallengeMode,
    /// Lifetime of a recorded challenge
    pub challenge_ttl: chrono::Duration,
    /// Backend endpoint named in send logs
    pub send_endpoint: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        let mode = match config.accepted_fixed_code() {
            Some(code) => ChallengeMode::FixedCode(code.to_string()),
            None => ChallengeMode::Issued,
        };
        Self {
            send_delay: Duration::from_millis(config.send_delay_ms),
            verify_delay: Duration::from_millis(config.verify_delay_ms),
            mode,
            challenge_ttl: chrono::Duration::seconds(config.challenge_ttl_seconds),
            send_endpoint: config.send_endpoint.clone(),
        }
    }
}

impl OtpServiceConfig {
    /// Configuration without simulated latency, for tests and local tools
    pub fn immediate() -> Self {
        Self {
            send_delay: Duration::ZERO,
            verify_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Switch to per-phone issued challenges
    pub fn with_issued_challenges(mut self) -> Self {
        self.mode = ChallengeMode::Issued;
        self
    }

    /// The universal code, when running in fixed-code mode
    pub fn fixed_code(&self) -> Option<&str> {
        match &self.mode {
            ChallengeMode::FixedCode(code) => Some(code),
            ChallengeMode::Issued => None,
        }
    }
}
