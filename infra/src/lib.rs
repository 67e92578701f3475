//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the LivenessID pipeline.
//! It provides concrete implementations for the seams the core services
//! depend on, and loads application configuration.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: In-memory OTP challenge store with expiry
//! - **Delivery**: Console code delivery for development
//! - **Camera**: Simulated camera device producing synthetic frames
//! - **Config**: Layered configuration loading from presets, files and the environment

pub mod cache;
pub mod camera;
pub mod config;
pub mod delivery;

use std::sync::Arc;
use std::time::Duration;

use lid_core::services::{
    LivenessEngineConfig, OtpService, OtpServiceConfig, TimedLivenessCheck, UploadService,
    UploadServiceConfig, VerificationFlowController,
};
use lid_shared::config::AppConfig;

pub use cache::InMemoryChallengeStore;
pub use camera::{CameraPermission, SimulatedCamera};
pub use config::{load_config, load_config_for};
pub use delivery::ConsoleCodeDelivery;

/// OTP service wired to the in-memory store and console delivery
pub type AppOtpService = OtpService<InMemoryChallengeStore, ConsoleCodeDelivery>;

/// Flow controller wired to the infrastructure implementations
pub type AppFlowController =
    VerificationFlowController<AppOtpService, UploadService, SimulatedCamera, TimedLivenessCheck>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Loaded application configuration
    pub config: AppConfig,
    /// Live OTP challenges
    pub challenge_store: Arc<InMemoryChallengeStore>,
    /// Code delivery channel
    pub code_delivery: Arc<ConsoleCodeDelivery>,
    /// Camera used by liveness capture
    pub camera: Arc<SimulatedCamera>,
    /// OTP service
    pub otp_service: Arc<AppOtpService>,
    /// Selfie upload service
    pub upload_service: Arc<UploadService>,
    /// Liveness analysis
    pub liveness_check: Arc<TimedLivenessCheck>,
}

impl InfrastructureServices {
    /// Wire services from configuration
    pub fn new(config: AppConfig) -> Self {
        let challenge_store = Arc::new(InMemoryChallengeStore::new());
        let code_delivery = Arc::new(ConsoleCodeDelivery::new());
        let camera = Arc::new(SimulatedCamera::default());

        let otp_service = Arc::new(OtpService::new(
            challenge_store.clone(),
            code_delivery.clone(),
            OtpServiceConfig::from(&config.otp),
        ));
        let upload_service = Arc::new(UploadService::new(UploadServiceConfig::from(&config.upload)));
        let liveness_check = Arc::new(TimedLivenessCheck::from(&config.liveness));

        Self {
            config,
            challenge_store,
            code_delivery,
            camera,
            otp_service,
            upload_service,
            liveness_check,
        }
    }

    /// Create a flow controller for one verification session
    pub fn flow_controller(&self) -> AppFlowController {
        VerificationFlowController::new(
            self.otp_service.clone(),
            self.upload_service.clone(),
            self.camera.clone(),
            self.liveness_check.clone(),
            LivenessEngineConfig::from(&self.config.liveness),
        )
    }

    /// Periodically drop expired challenges from the store
    pub fn spawn_challenge_purge(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.challenge_store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "Purged expired OTP challenges");
                }
            }
        })
    }
}

/// Initialize infrastructure services
///
/// Wires the challenge store, delivery channel, camera and the OTP, upload
/// and liveness services from a loaded configuration. Call after logging is
/// set up so the summary line is recorded.
pub fn initialize(config: AppConfig) -> InfrastructureServices {
    tracing::info!("Initializing infrastructure services...");

    let services = InfrastructureServices::new(config);

    tracing::info!(
        environment = %services.config.environment,
        issued_challenges = services.config.otp.uses_issued_challenges(),
        "Infrastructure services initialized successfully"
    );

    services
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Code delivery error
    #[error("Code delivery error: {0}")]
    Delivery(String),
}
