use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// Phone number in `+91XXXXXXXXXX` format
    #[validate(length(min = 1, message = "Phone number is required."))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(length(min = 1, message = "Phone number is required."))]
    pub phone_number: String,

    /// Verification code, checked only by the OTP service
    pub otp: String,
}

/// Selfie upload request
///
/// `image` and `token` are not validated here: the upload service owns
/// those checks and reports them with their own status codes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadSelfieRequest {
    #[validate(length(min = 1, message = "Phone number is required."))]
    pub phone_number: String,

    /// JPEG data URI
    pub image: String,

    /// Auth token returned by OTP verification
    pub token: String,
}
