//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `verification` - OTP, upload and liveness step settings

pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use verification::{LivenessConfig, OtpConfig, UploadConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// OTP issuance and verification settings
    #[serde(default)]
    pub otp: OtpConfig,

    /// Selfie upload settings
    #[serde(default)]
    pub upload: UploadConfig,

    /// Liveness capture settings
    #[serde(default)]
    pub liveness: LivenessConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 9000),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            otp: OtpConfig::default(),
            upload: UploadConfig::default(),
            liveness: LivenessConfig::default(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 9000),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
            otp: OtpConfig::default(),
            upload: UploadConfig::default(),
            liveness: LivenessConfig::default(),
        }
    }

    /// Preset configuration for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load the preset for the environment named by `ENVIRONMENT`
    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_inherits_development_settings() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_production_uses_restrictive_cors() {
        let config = AppConfig::production();
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_serializes_round_trip_through_json() {
        let json = serde_json::to_string(&AppConfig::development()).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.otp.fixed_code.as_deref(), Some("123456"));
    }
}
