//! # LivenessID Core
//!
//! Domain layer and step services for the LivenessID verification pipeline.
//! This crate contains the phone validator, OTP and upload services, the
//! liveness capture engine and the flow controller that sequences them,
//! together with the domain types and error types they share.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
