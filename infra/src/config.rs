//! Configuration loading for the application
//!
//! Layers, lowest precedence first:
//! 1. The preset for the environment named by `ENVIRONMENT`
//! 2. An optional `config.{environment}.toml` file
//! 3. `LID__`-prefixed environment variables, `__` separating sections
//!    (`LID__OTP__SEND_DELAY_MS=0`, `LID__SERVER__PORT=8080`)
//!
//! A blank `otp.fixed_code` selects issued challenges.

use ::config::{Config, Environment as EnvironmentSource, File};

use lid_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "LID";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Load configuration for the environment named by `ENVIRONMENT`
///
/// `.env.{environment}` and `.env` files are read first if present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    load_config_for(environment)
}

/// Load configuration for an explicit environment
pub fn load_config_for(environment: Environment) -> Result<AppConfig, InfrastructureError> {
    let preset = AppConfig::for_environment(environment);

    let settings = Config::builder()
        .add_source(Config::try_from(&preset)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(EnvironmentSource::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.otp.validate().map_err(::config::ConfigError::Message)?;

    tracing::debug!(
        environment = %config.environment,
        bind_address = %config.server.bind_address(),
        "Configuration loaded"
    );

    Ok(config)
}
