//! Shared utilities and common types for the LivenessID server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response envelopes
//! - Utility functions (phone format, data URIs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, LogFormat,
    ServerConfig, CorsConfig, OtpConfig, UploadConfig, LivenessConfig,
};
pub use types::{ActionResult, HealthResponse};
pub use utils::{data_uri, phone};
