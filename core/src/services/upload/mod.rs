//! Selfie upload module
//!
//! Accepts a captured selfie for a verified phone number. Storage is simulated:
//! every accepted upload resolves to the configured placeholder reference.

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::UploadServiceConfig;
pub use service::UploadService;
pub use traits::UploadServiceTrait;
