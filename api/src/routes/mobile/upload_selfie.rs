use actix_web::{web, HttpResponse};
use validator::Validate;

use lid_core::domain::value_objects::{AuthToken, CapturedImage};
use lid_core::services::{OtpServiceTrait, PhoneValidator, UploadServiceTrait};
use lid_shared::types::ActionResult;

use crate::app::AppState;
use crate::dto::UploadSelfieRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/mobile/uploadSelfie
///
/// # Request Body
///
/// ```json
/// {
///     "phoneNumber": "+919876543210",
///     "image": "data:image/jpeg;base64,...",
///     "token": "fake-jwt-for-+919876543210-1700000000000"
/// }
/// ```
///
/// # Response
///
/// * `200` - `{ "success": true, "imageUrl": "https://placehold.co/480x640.png" }`
/// * `401` - Unrecognized auth token
/// * `422` - Image is not a JPEG data URI
pub async fn upload_selfie<O, U>(
    state: web::Data<AppState<O, U>>,
    request: web::Json<UploadSelfieRequest>,
) -> Result<HttpResponse, ApiError>
where
    O: OtpServiceTrait + 'static,
    U: UploadServiceTrait + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let phone = PhoneValidator::validate(&request.phone_number)?;
    let token = AuthToken::from_raw(request.token);
    let image = CapturedImage::from_data_uri(request.image);

    let reference = state.upload_service.upload(&phone, image, &token).await?;

    tracing::info!(
        phone = %phone.masked(),
        image_url = %reference.url,
        event = "upload_selfie_success",
        "Selfie accepted via API"
    );

    Ok(HttpResponse::Ok().json(ActionResult::with_image_url(reference.url)))
}
