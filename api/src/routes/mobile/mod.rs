//! Mobile verification route handlers
//!
//! The simulated backend actions used by the verification flow:
//! - Sending an OTP to a phone number
//! - Verifying the OTP and issuing an auth token
//! - Uploading the captured selfie

pub mod send_otp;
pub mod upload_selfie;
pub mod verify_otp;

pub use send_otp::send_otp;
pub use upload_selfie::upload_selfie;
pub use verify_otp::verify_otp;
