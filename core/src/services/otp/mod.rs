//! OTP service module for phone possession checks
//!
//! This module provides the one-time code workflow:
//! - Challenge issuance with simulated backend latency
//! - Fixed-code mode for the simulated environment
//! - Per-phone issued challenges with expiry and attempt tracking
//! - Auth token synthesis on successful verification

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::{ChallengeMode, OtpServiceConfig};
pub use service::OtpService;
pub use traits::{ChallengeStoreTrait, CodeDeliveryTrait, OtpServiceTrait};
