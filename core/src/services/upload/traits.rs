//! Trait for the selfie upload seam

use async_trait::async_trait;

use crate::domain::value_objects::{AuthToken, CapturedImage, ImageReference, PhoneNumber};
use crate::errors::UploadError;

/// The upload operation the liveness capture engine depends on
#[async_trait]
pub trait UploadServiceTrait: Send + Sync {
    /// Upload a captured image for a verified phone number
    ///
    /// The image is consumed; it does not outlive the call.
    async fn upload(
        &self,
        phone: &PhoneNumber,
        image: CapturedImage,
        token: &AuthToken,
    ) -> Result<ImageReference, UploadError>;
}
