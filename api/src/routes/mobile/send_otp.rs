use actix_web::{web, HttpResponse};
use validator::Validate;

use lid_core::services::{OtpServiceTrait, PhoneValidator, UploadServiceTrait};
use lid_shared::types::ActionResult;

use crate::app::AppState;
use crate::dto::SendOtpRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/mobile/sendOTP
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+919876543210" }
/// ```
///
/// # Response
///
/// * `200` - `{ "success": true }`
/// * `400` - Invalid phone number format
/// * `500` - The code could not be issued
pub async fn send_otp<O, U>(
    state: web::Data<AppState<O, U>>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OtpServiceTrait + 'static,
    U: UploadServiceTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let phone = PhoneValidator::validate(&request.phone_number)?;

    tracing::info!(
        phone = %phone.masked(),
        event = "send_otp_request",
        "Processing sendOTP request"
    );

    state.otp_service.send(&phone).await?;

    Ok(HttpResponse::Ok().json(ActionResult::ok()))
}
