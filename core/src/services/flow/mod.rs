//! Verification flow module
//!
//! Sequences phone entry, OTP verification and liveness capture for one
//! session, strictly in forward order.

mod controller;

#[cfg(test)]
mod tests;

pub use controller::VerificationFlowController;
