//! Application state and factory
//!
//! This module holds the shared services and provides the factory for
//! creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use lid_core::services::{OtpServiceTrait, UploadServiceTrait};
use lid_shared::config::{CorsConfig, ServerConfig};
use lid_shared::types::{ActionResult, HealthResponse};

use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes::mobile::{send_otp, upload_selfie, verify_otp};

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "liveness-id-api";

/// Application state that holds shared services
pub struct AppState<O, U>
where
    O: OtpServiceTrait,
    U: UploadServiceTrait,
{
    pub otp_service: Arc<O>,
    pub upload_service: Arc<U>,
}

impl<O, U> AppState<O, U>
where
    O: OtpServiceTrait,
    U: UploadServiceTrait,
{
    pub fn new(otp_service: Arc<O>, upload_service: Arc<U>) -> Self {
        Self {
            otp_service,
            upload_service,
        }
    }
}

/// Create and configure the application
///
/// # Arguments
///
/// * `app_state` - Shared OTP and upload services
/// * `server` - Server settings (JSON payload limit)
/// * `cors` - Cross-origin policy
pub fn create_app<O, U>(
    app_state: web::Data<AppState<O, U>>,
    server: &ServerConfig,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    O: OtpServiceTrait + 'static,
    U: UploadServiceTrait + 'static,
{
    // Selfie data URIs are far larger than the default 32 KiB limit
    let json_config = web::JsonConfig::default()
        .limit(server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Registered last so request spans cover CORS rejections too
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/mobile")
                .route("/sendOTP", web::post().to(send_otp::<O, U>))
                .route("/verifyOTP", web::post().to(verify_otp::<O, U>))
                .route("/uploadSelfie", web::post().to(upload_selfie::<O, U>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ActionResult::failure("The requested resource was not found"))
}
