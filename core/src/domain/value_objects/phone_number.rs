//! Validated phone number value object

use serde::{Deserialize, Serialize};
use std::fmt;

use lid_shared::utils::phone::mask_phone_number;

use crate::errors::PhoneError;
use crate::services::phone_validator::PhoneValidator;

/// A phone number accepted by [`PhoneValidator`]
///
/// The only ways to obtain one are `PhoneValidator::validate` and the
/// `TryFrom`/`Deserialize` impls that delegate to it, so holding a
/// `PhoneNumber` proves the canonical `+91XXXXXXXXXX` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub(crate) fn from_validated(phone: String) -> Self {
        Self(phone)
    }

    /// The number in E.164 form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for logs, e.g. `+91****3210`
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        PhoneValidator::validate(&raw)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = PhoneError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        PhoneValidator::validate(raw)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_accepts_canonical_number() {
        let phone = PhoneNumber::try_from("+919876543210").unwrap();
        assert_eq!(phone.as_str(), "+919876543210");
        assert_eq!(phone.masked(), "+91****3210");
    }

    #[test]
    fn test_deserialize_goes_through_validator() {
        let phone: PhoneNumber = serde_json::from_str("\"+919876543210\"").unwrap();
        assert_eq!(phone.to_string(), "+919876543210");

        let rejected = serde_json::from_str::<PhoneNumber>("\"+911234567890\"");
        assert!(rejected.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let phone = PhoneNumber::try_from("+919876543210").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"+919876543210\"");
    }
}
