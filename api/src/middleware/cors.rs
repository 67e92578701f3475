//! CORS middleware configuration for cross-origin requests.
//!
//! The verification front end is served from a different origin than this
//! API, so every endpoint answers preflight requests. Development accepts
//! any origin; other environments accept only the configured allow-list.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use lid_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// An `allowed_origins` entry of `*` selects the permissive development
/// policy; otherwise each listed origin is allowed explicitly.
pub fn create_cors(config: &CorsConfig) -> Cors {
    if config.allows_any_origin() {
        create_development_cors(config)
    } else {
        create_restricted_cors(config)
    }
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring permissive CORS");

    let cors = Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    with_credentials(cors, config)
}

fn create_restricted_cors(config: &CorsConfig) -> Cors {
    tracing::info!(origins = config.allowed_origins.len(), "Configuring CORS allow-list");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            tracing::info!(origin = %origin, "Adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }

    with_credentials(cors, config)
}

fn with_credentials(cors: Cors, config: &CorsConfig) -> Cors {
    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(config: CorsConfig, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/ping", web::post().to(HttpResponse::Ok)),
        )
        .await;

        let request = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        test::call_service(&app, request).await.status()
    }

    #[actix_web::test]
    async fn test_development_cors_accepts_any_origin() {
        let status = preflight(CorsConfig::development(), "http://localhost:3000").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_allow_list_accepts_listed_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://verify.example.com".to_string()],
            ..CorsConfig::default()
        };
        assert_eq!(preflight(config, "https://verify.example.com").await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_allow_list_rejects_unknown_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://verify.example.com".to_string()],
            ..CorsConfig::default()
        };
        assert_eq!(preflight(config, "https://evil.example.com").await, StatusCode::BAD_REQUEST);
    }
}
