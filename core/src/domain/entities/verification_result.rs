//! Terminal record of a completed verification session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ImageReference, PhoneNumber};

/// Outcome of a session that went through every verification step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// The verified phone number
    pub phone_number: PhoneNumber,

    /// Reference to the uploaded selfie
    pub image_reference: ImageReference,

    /// Timestamp when the session completed
    pub completed_at: DateTime<Utc>,
}

impl VerificationResult {
    /// Create a result completed now
    pub fn new(phone_number: PhoneNumber, image_reference: ImageReference) -> Self {
        Self {
            phone_number,
            image_reference,
            completed_at: Utc::now(),
        }
    }
}
