//! # LivenessID API
//!
//! HTTP surface of the simulated verification backend: OTP issuance and
//! verification, selfie upload and a health check.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
