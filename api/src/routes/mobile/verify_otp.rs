use actix_web::{web, HttpResponse};
use validator::Validate;

use lid_core::services::{OtpServiceTrait, PhoneValidator, UploadServiceTrait};
use lid_shared::types::ActionResult;

use crate::app::AppState;
use crate::dto::VerifyOtpRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/mobile/verifyOTP
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+919876543210", "otp": "123456" }
/// ```
///
/// # Response
///
/// * `200` - `{ "success": true, "token": "fake-jwt-for-..." }`
/// * `400` - Malformed phone number or code
/// * `401` - Invalid or expired code
pub async fn verify_otp<O, U>(
    state: web::Data<AppState<O, U>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OtpServiceTrait + 'static,
    U: UploadServiceTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let phone = PhoneValidator::validate(&request.phone_number)?;
    let token = state.otp_service.verify(&phone, &request.otp).await?;

    tracing::info!(
        phone = %phone.masked(),
        event = "verify_otp_success",
        "OTP verified via API"
    );

    Ok(HttpResponse::Ok().json(ActionResult::with_token(token.as_str())))
}
