//! Phone number validation against the Indian mobile numbering format.

use lid_shared::utils::phone::is_valid_india_mobile;

use crate::domain::value_objects::PhoneNumber;
use crate::errors::PhoneError;

/// Validates raw input into a [`PhoneNumber`]
///
/// Accepts exactly `+91`, a leading digit in 6-9 and nine further digits.
/// Input must already be canonical; nothing is stripped or reformatted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneValidator;

impl PhoneValidator {
    /// Validate a raw phone number
    pub fn validate(raw: &str) -> Result<PhoneNumber, PhoneError> {
        if is_valid_india_mobile(raw) {
            Ok(PhoneNumber::from_validated(raw.to_string()))
        } else {
            Err(PhoneError::InvalidFormat {
                phone: raw.to_string(),
            })
        }
    }
}
