use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use lid_api::{create_app, telemetry, AppState};

/// Interval between sweeps of expired OTP challenges
const CHALLENGE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = lid_infra::load_config().context("failed to load configuration")?;

    telemetry::init_tracing(&config.logging).context("failed to initialise tracing")?;

    tracing::info!(environment = %config.environment, "Starting LivenessID API Server");

    let services = lid_infra::initialize(config);
    let purge = services.spawn_challenge_purge(CHALLENGE_PURGE_INTERVAL);

    let app_state = web::Data::new(AppState::new(
        services.otp_service.clone(),
        services.upload_service.clone(),
    ));
    let server_config = services.config.server.clone();
    let cors_config = services.config.cors.clone();
    let bind_address = server_config.bind_address();

    tracing::info!(address = %bind_address, "Server will bind to address");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &server_config, &cors_config)
    });
    if services.config.server.workers > 0 {
        server = server.workers(services.config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    purge.abort();
    tracing::info!("Server stopped");
    Ok(())
}
