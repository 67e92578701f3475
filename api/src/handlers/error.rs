//! API error type and its HTTP mapping
//!
//! Every failure is rendered as an [`ActionResult`] with `success: false`
//! and the user-facing message of the underlying step error.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use lid_core::errors::{PhoneError, SendError, UploadError, VerifyError};
use lid_shared::types::ActionResult;

/// Errors returned by the mobile endpoints
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body failed DTO validation
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Phone(#[from] PhoneError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}.", field))
                })
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages.join(" "))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Phone(_) => StatusCode::BAD_REQUEST,
            ApiError::Send(SendError::InvalidFormat) => StatusCode::BAD_REQUEST,
            ApiError::Verify(VerifyError::InvalidOrExpired) => StatusCode::UNAUTHORIZED,
            ApiError::Upload(UploadError::InvalidToken) => StatusCode::UNAUTHORIZED,
            ApiError::Upload(UploadError::InvalidImage) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Send(SendError::Transport { .. })
            | ApiError::Verify(VerifyError::Transport { .. })
            | ApiError::Upload(UploadError::Transport { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(ActionResult::failure(self.to_string()))
    }
}

/// Render malformed or oversized JSON bodies in the same envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let response =
        HttpResponse::build(status).json(ActionResult::failure(format!("Invalid request body: {}", err)));
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    use crate::dto::SendOtpRequest;

    #[test]
    fn test_status_codes_per_error() {
        assert_eq!(
            ApiError::Phone(PhoneError::InvalidFormat { phone: "123".to_string() }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Verify(VerifyError::InvalidOrExpired).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Upload(UploadError::InvalidToken).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Upload(UploadError::InvalidImage).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Send(SendError::Transport { message: "down".to_string() }).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_the_step_error_message() {
        let error = ApiError::from(VerifyError::InvalidOrExpired);
        assert_eq!(error.to_string(), "Invalid or expired OTP. Please try again.");
    }

    #[test]
    fn test_validation_errors_use_field_messages() {
        let request = SendOtpRequest {
            phone_number: String::new(),
        };
        let error = ApiError::from(request.validate().unwrap_err());
        assert_eq!(error.to_string(), "Phone number is required.");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
