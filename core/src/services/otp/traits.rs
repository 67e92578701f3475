//! Traits for OTP challenge storage, code delivery and the service seam

use async_trait::async_trait;

use crate::domain::entities::OtpChallenge;
use crate::domain::value_objects::{AuthToken, PhoneNumber};
use crate::errors::{SendError, VerifyError};

/// Trait for challenge storage integration
#[async_trait]
pub trait ChallengeStoreTrait: Send + Sync {
    /// Store a challenge, replacing any live challenge for the same phone number
    async fn put(&self, challenge: OtpChallenge) -> Result<(), String>;
    /// Get the live challenge for a phone number, if any
    async fn get(&self, phone: &PhoneNumber) -> Result<Option<OtpChallenge>, String>;
    /// Remove the challenge for a phone number
    async fn remove(&self, phone: &PhoneNumber) -> Result<(), String>;
}

/// Trait for code delivery integration (SMS, WhatsApp, console)
#[async_trait]
pub trait CodeDeliveryTrait: Send + Sync {
    /// Deliver a code to a phone number, returning the provider message id
    async fn deliver_code(&self, phone: &PhoneNumber, code: &str) -> Result<String, String>;
}

/// The OTP operations the verification flow depends on
#[async_trait]
pub trait OtpServiceTrait: Send + Sync {
    /// Issue a challenge for a phone number
    async fn send(&self, phone: &PhoneNumber) -> Result<(), SendError>;
    /// Verify a code and obtain an auth token
    async fn verify(&self, phone: &PhoneNumber, code: &str) -> Result<AuthToken, VerifyError>;
}
