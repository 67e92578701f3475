//! Main OTP service implementation

use async_trait::async_trait;
use chrono::Utc;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use tokio::time::sleep;

use crate::domain::entities::{ChallengeRejection, OtpChallenge};
use crate::domain::value_objects::{AuthToken, PhoneNumber};
use crate::errors::{SendError, VerifyError};
use crate::services::phone_validator::PhoneValidator;

use super::config::{ChallengeMode, OtpServiceConfig};
use super::traits::{ChallengeStoreTrait, CodeDeliveryTrait, OtpServiceTrait};

/// OTP service issuing and verifying one-time codes against a simulated backend
pub struct OtpService<S: ChallengeStoreTrait, D: CodeDeliveryTrait> {
    /// Storage for live challenges
    challenge_store: Arc<S>,
    /// Channel that delivers issued codes
    code_delivery: Arc<D>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: ChallengeStoreTrait, D: CodeDeliveryTrait> OtpService<S, D> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `challenge_store` - Challenge storage implementation
    /// * `code_delivery` - Code delivery implementation (unused in fixed-code mode)
    /// * `config` - Service configuration
    pub fn new(challenge_store: Arc<S>, code_delivery: Arc<D>, config: OtpServiceConfig) -> Self {
        Self {
            challenge_store,
            code_delivery,
            config,
        }
    }

    /// Get the service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a challenge for a phone number
    ///
    /// This method:
    /// 1. Re-validates the phone number format
    /// 2. Waits for the simulated round-trip
    /// 3. Records a fresh challenge, replacing any previous one
    /// 4. Delivers the code (issued mode only)
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The challenge was issued
    /// * `Err(SendError)` - Invalid format, or storage/delivery failure
    pub async fn send_code(&self, phone: &PhoneNumber) -> Result<(), SendError> {
        let phone = PhoneValidator::validate(phone.as_str()).map_err(|e| {
            tracing::warn!(
                event = "otp_send_rejected",
                "Phone number failed re-validation before sending OTP"
            );
            SendError::from(e)
        })?;

        tracing::info!(
            phone = %phone.masked(),
            endpoint = %self.config.send_endpoint,
            event = "otp_send_requested",
            "Sending OTP"
        );

        sleep(self.config.send_delay).await;

        let challenge = match &self.config.mode {
            ChallengeMode::FixedCode(code) => {
                OtpChallenge::with_code(phone.clone(), code.clone(), self.config.challenge_ttl)
            }
            ChallengeMode::Issued => OtpChallenge::issue(phone.clone(), self.config.challenge_ttl),
        };
        let session_id = challenge.id;
        let code = challenge.code.clone();

        self.challenge_store.put(challenge).await.map_err(|e| {
            tracing::error!(
                phone = %phone.masked(),
                error = %e,
                event = "otp_storage_failed",
                "Failed to record OTP challenge"
            );
            SendError::Transport { message: e }
        })?;

        if self.config.mode == ChallengeMode::Issued {
            match self.code_delivery.deliver_code(&phone, &code).await {
                Ok(message_id) => {
                    tracing::debug!(
                        phone = %phone.masked(),
                        message_id = %message_id,
                        "OTP delivered"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        phone = %phone.masked(),
                        error = %e,
                        event = "otp_delivery_failed",
                        "Failed to deliver OTP"
                    );
                    // An undelivered challenge must not stay live
                    let _ = self.challenge_store.remove(&phone).await;
                    return Err(SendError::Transport { message: e });
                }
            }
        }

        tracing::info!(
            phone = %phone.masked(),
            session_id = %session_id,
            event = "otp_sent",
            "OTP challenge issued"
        );

        Ok(())
    }

    /// Verify a code for a phone number
    ///
    /// In fixed-code mode the configured code is accepted for any phone
    /// number. In issued mode the live challenge is consumed on success and
    /// kept, with its attempt counted, on a mismatch.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthToken)` - Token bound to the phone number and current time
    /// * `Err(VerifyError)` - Wrong, expired or missing code, or storage failure
    pub async fn verify_code(&self, phone: &PhoneNumber, code: &str) -> Result<AuthToken, VerifyError> {
        sleep(self.config.verify_delay).await;

        tracing::debug!(
            phone = %phone.masked(),
            event = "otp_verify_requested",
            "Verifying OTP"
        );

        match &self.config.mode {
            ChallengeMode::FixedCode(expected) => {
                if !Self::codes_match(expected, code) {
                    tracing::warn!(
                        phone = %phone.masked(),
                        event = "otp_verification_failed",
                        "OTP did not match"
                    );
                    return Err(VerifyError::InvalidOrExpired);
                }
                if let Err(e) = self.challenge_store.remove(phone).await {
                    tracing::warn!(
                        phone = %phone.masked(),
                        error = %e,
                        "Failed to clear recorded challenge"
                    );
                }
            }
            ChallengeMode::Issued => self.consume_challenge(phone, code).await?,
        }

        let token = AuthToken::issue(phone, Utc::now());

        tracing::info!(
            phone = %phone.masked(),
            event = "otp_verified_success",
            "OTP verified, auth token issued"
        );

        Ok(token)
    }

    /// Check a code against the stored challenge and update the store
    async fn consume_challenge(&self, phone: &PhoneNumber, code: &str) -> Result<(), VerifyError> {
        let stored = self
            .challenge_store
            .get(phone)
            .await
            .map_err(|e| VerifyError::Transport { message: e })?;

        let Some(mut challenge) = stored else {
            tracing::warn!(
                phone = %phone.masked(),
                event = "otp_challenge_missing",
                "No live OTP challenge for phone number"
            );
            return Err(VerifyError::InvalidOrExpired);
        };

        match challenge.verify(code) {
            Ok(()) => {
                self.challenge_store
                    .remove(phone)
                    .await
                    .map_err(|e| VerifyError::Transport { message: e })?;
                Ok(())
            }
            Err(ChallengeRejection::Mismatch { remaining }) if remaining > 0 => {
                tracing::warn!(
                    phone = %phone.masked(),
                    remaining_attempts = remaining,
                    event = "otp_verification_failed",
                    "OTP did not match"
                );
                self.challenge_store
                    .put(challenge)
                    .await
                    .map_err(|e| VerifyError::Transport { message: e })?;
                Err(VerifyError::InvalidOrExpired)
            }
            Err(rejection) => {
                tracing::warn!(
                    phone = %phone.masked(),
                    reason = %rejection,
                    event = "otp_challenge_invalidated",
                    "OTP challenge invalidated"
                );
                self.challenge_store
                    .remove(phone)
                    .await
                    .map_err(|e| VerifyError::Transport { message: e })?;
                Err(VerifyError::InvalidOrExpired)
            }
        }
    }

    fn codes_match(expected: &str, provided: &str) -> bool {
        expected.len() == provided.len() && constant_time_eq(expected.as_bytes(), provided.as_bytes())
    }
}

#[async_trait]
impl<S: ChallengeStoreTrait, D: CodeDeliveryTrait> OtpServiceTrait for OtpService<S, D> {
    async fn send(&self, phone: &PhoneNumber) -> Result<(), SendError> {
        self.send_code(phone).await
    }

    async fn verify(&self, phone: &PhoneNumber, code: &str) -> Result<AuthToken, VerifyError> {
        self.verify_code(phone, code).await
    }
}
