//! Simulated selfie upload service

use async_trait::async_trait;
use tokio::time::sleep;

use crate::domain::value_objects::{AuthToken, CapturedImage, ImageReference, PhoneNumber};
use crate::errors::UploadError;

use super::config::UploadServiceConfig;
use super::traits::UploadServiceTrait;

/// Upload service accepting selfies against a simulated storage backend
#[derive(Debug, Clone, Default)]
pub struct UploadService {
    config: UploadServiceConfig,
}

impl UploadService {
    /// Create a new upload service
    pub fn new(config: UploadServiceConfig) -> Self {
        Self { config }
    }

    /// Get the service configuration
    pub fn config(&self) -> &UploadServiceConfig {
        &self.config
    }

    /// Upload a captured selfie
    ///
    /// The simulated round-trip delay applies to every call, accepted or
    /// rejected. Checks then run in order and the first failure wins:
    /// 1. The token must carry the OTP service marker
    /// 2. The payload must be a base64 JPEG data URI
    ///
    /// # Arguments
    ///
    /// * `phone` - Verified phone number the selfie belongs to
    /// * `image` - Captured image, consumed by the upload
    /// * `token` - Auth token returned by OTP verification
    ///
    /// # Returns
    ///
    /// * `Ok(ImageReference)` - The placeholder reference
    /// * `Err(UploadError)` - Token or image rejected
    pub async fn upload_selfie(
        &self,
        phone: &PhoneNumber,
        image: CapturedImage,
        token: &AuthToken,
    ) -> Result<ImageReference, UploadError> {
        sleep(self.config.delay).await;

        if !token.is_recognized() {
            tracing::warn!(
                phone = %phone.masked(),
                event = "selfie_upload_rejected",
                reason = "invalid_token",
                "Upload rejected"
            );
            return Err(UploadError::InvalidToken);
        }

        if !image.is_jpeg_data_uri() {
            tracing::warn!(
                phone = %phone.masked(),
                event = "selfie_upload_rejected",
                reason = "invalid_image",
                "Upload rejected"
            );
            return Err(UploadError::InvalidImage);
        }

        tracing::info!(
            phone = %phone.masked(),
            payload_bytes = image.as_data_uri().len(),
            event = "selfie_upload_started",
            "Uploading selfie"
        );

        let reference = self.config.placeholder.clone();

        tracing::info!(
            phone = %phone.masked(),
            image_url = %reference,
            event = "selfie_uploaded",
            "Selfie uploaded"
        );

        Ok(reference)
    }
}

#[async_trait]
impl UploadServiceTrait for UploadService {
    async fn upload(
        &self,
        phone: &PhoneNumber,
        image: CapturedImage,
        token: &AuthToken,
    ) -> Result<ImageReference, UploadError> {
        self.upload_selfie(phone, image, token).await
    }
}
