//! OTP challenge entity: a code issued for one phone number.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::PhoneNumber;

/// Maximum number of verification attempts per challenge
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of a one-time code
pub const CODE_LENGTH: usize = 6;

/// Reason a code was not accepted by a challenge
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeRejection {
    #[error("challenge has expired")]
    Expired,

    #[error("maximum verification attempts exceeded")]
    AttemptsExhausted,

    #[error("code does not match, {remaining} attempt(s) remaining")]
    Mismatch { remaining: u32 },
}

/// A one-time code issued for a phone number
///
/// At most one live challenge exists per phone number; issuing a new one
/// replaces the previous challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Unique identifier, used to correlate log lines
    pub id: Uuid,

    /// Phone number the challenge was issued for
    pub phone: PhoneNumber,

    /// The expected code
    pub code: String,

    /// Number of verification attempts made
    pub attempts: u32,

    /// Timestamp when the challenge was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the challenge expires
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Issue a challenge with a freshly generated random code
    pub fn issue(phone: PhoneNumber, ttl: Duration) -> Self {
        Self::with_code(phone, Self::generate_code(), ttl)
    }

    /// Issue a challenge expecting a known code
    pub fn with_code(phone: PhoneNumber, code: impl Into<String>, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            code: code.into(),
            attempts: 0,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// Generate a random 6-digit code from the OS CSPRNG
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        // Modulo bias over 2^32 is negligible for a 6-digit space
        let code = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", code)
    }

    /// Checks if the challenge has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the challenge is expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Verifies a code against this challenge
    ///
    /// Counts the attempt unless the challenge is already expired or exhausted.
    /// Comparison is constant-time.
    pub fn verify(&mut self, input_code: &str) -> Result<(), ChallengeRejection> {
        if self.is_expired() {
            return Err(ChallengeRejection::Expired);
        }
        if self.attempts >= MAX_ATTEMPTS {
            return Err(ChallengeRejection::AttemptsExhausted);
        }

        self.attempts += 1;

        if self.code.len() == input_code.len()
            && constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
        {
            Ok(())
        } else {
            Err(ChallengeRejection::Mismatch {
                remaining: self.remaining_attempts(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> PhoneNumber {
        PhoneNumber::try_from("+919876543210").unwrap()
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = OtpChallenge::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_verify_success() {
        let mut challenge = OtpChallenge::with_code(phone(), "654321", Duration::minutes(5));
        assert_eq!(challenge.verify("654321"), Ok(()));
        assert_eq!(challenge.attempts, 1);
    }

    #[test]
    fn test_verify_mismatch_counts_attempts() {
        let mut challenge = OtpChallenge::with_code(phone(), "654321", Duration::minutes(5));
        assert_eq!(
            challenge.verify("000000"),
            Err(ChallengeRejection::Mismatch { remaining: 2 })
        );
        assert_eq!(challenge.remaining_attempts(), 2);
    }

    #[test]
    fn test_attempts_exhausted_rejects_correct_code() {
        let mut challenge = OtpChallenge::with_code(phone(), "654321", Duration::minutes(5));
        for _ in 0..MAX_ATTEMPTS {
            assert!(challenge.verify("000000").is_err());
        }
        assert_eq!(
            challenge.verify("654321"),
            Err(ChallengeRejection::AttemptsExhausted)
        );
        assert_eq!(challenge.attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_expired_challenge_rejects_without_counting() {
        let mut challenge = OtpChallenge::with_code(phone(), "654321", Duration::zero());
        assert!(challenge.is_expired());
        assert_eq!(challenge.verify("654321"), Err(ChallengeRejection::Expired));
        assert_eq!(challenge.attempts, 0);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut challenge = OtpChallenge::with_code(phone(), "654321", Duration::minutes(5));
        assert!(challenge.verify("6543210").is_err());
        assert!(challenge.verify("").is_err());
    }

    #[test]
    fn test_serialization() {
        let challenge = OtpChallenge::issue(phone(), Duration::minutes(5));
        let json = serde_json::to_string(&challenge).unwrap();
        let deserialized: OtpChallenge = serde_json::from_str(&json).unwrap();
        assert_eq!(challenge, deserialized);
    }
}
