//! Configuration for the liveness capture engine

use lid_shared::config::verification::LivenessConfig;

use super::traits::FacingMode;

/// Configuration for the liveness capture engine
#[derive(Debug, Clone)]
pub struct LivenessEngineConfig {
    /// Camera to request
    pub facing_mode: FacingMode,
    /// JPEG quality for the captured selfie
    pub jpeg_quality: u8,
}

impl Default for LivenessEngineConfig {
    fn default() -> Self {
        Self::from(&LivenessConfig::default())
    }
}

impl From<&LivenessConfig> for LivenessEngineConfig {
    fn from(config: &LivenessConfig) -> Self {
        Self {
            facing_mode: FacingMode::User,
            jpeg_quality: config.jpeg_quality,
        }
    }
}
