//! Domain entities representing verification session records.

pub mod otp_challenge;
pub mod verification_result;

// Re-export commonly used types
pub use otp_challenge::{OtpChallenge, ChallengeRejection, CODE_LENGTH, MAX_ATTEMPTS};
pub use verification_result::VerificationResult;
