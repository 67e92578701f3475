//! Configuration for the upload service

use std::time::Duration;

use lid_shared::config::verification::UploadConfig;

use crate::domain::value_objects::ImageReference;

/// Configuration for the upload service
#[derive(Debug, Clone)]
pub struct UploadServiceConfig {
    /// Simulated latency of an upload round-trip
    pub delay: Duration,
    /// Reference returned for every accepted upload
    pub placeholder: ImageReference,
}

impl Default for UploadServiceConfig {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadServiceConfig {
    fn from(config: &UploadConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            placeholder: ImageReference::new(
                config.placeholder_url.clone(),
                config.placeholder_width,
                config.placeholder_height,
            ),
        }
    }
}

impl UploadServiceConfig {
    /// Configuration without simulated latency
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
