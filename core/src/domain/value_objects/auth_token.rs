//! Auth token issued after a successful OTP verification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PhoneNumber;

/// Marker prefix identifying tokens produced by the OTP service
pub const AUTH_TOKEN_MARKER: &str = "fake-jwt-for-";

/// Opaque credential required by the selfie upload
///
/// Tokens issued locally have the form `fake-jwt-for-{phone}-{epoch_millis}`.
/// Tokens received from clients are wrapped with [`AuthToken::from_raw`]
/// and only checked by the upload service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Issue a token bound to a phone number and issuance time
    pub fn issue(phone: &PhoneNumber, issued_at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{}-{}",
            AUTH_TOKEN_MARKER,
            phone.as_str(),
            issued_at.timestamp_millis()
        ))
    }

    /// Wrap a token string received from outside without checking it
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token carries the marker of the OTP service
    pub fn is_recognized(&self) -> bool {
        self.0.starts_with(AUTH_TOKEN_MARKER)
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_issue_encodes_phone_and_millis() {
        let phone = PhoneNumber::try_from("+919876543210").unwrap();
        let issued_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        let token = AuthToken::issue(&phone, issued_at);

        assert_eq!(token.as_str(), "fake-jwt-for-+919876543210-1700000000123");
        assert!(token.is_recognized());
        assert!(!token.is_empty());
    }

    #[test]
    fn test_raw_tokens_are_recognized_by_marker_only() {
        assert!(AuthToken::from_raw("fake-jwt-for-anything").is_recognized());
        assert!(!AuthToken::from_raw("Bearer eyJhbGciOi").is_recognized());
        assert!(!AuthToken::from_raw("").is_recognized());
    }
}
