//! Phone number utilities

use regex::Regex;
use once_cell::sync::Lazy;

/// Country calling code accepted by the verification flow
pub const INDIA_COUNTRY_CODE: &str = "+91";

// Indian mobile number in E.164 form: +91, a leading digit 6-9, then nine digits.
// ASCII classes only; `\d` would also accept non-ASCII digits.
static INDIA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+91[6-9][0-9]{9}$").unwrap()
});

/// Check if a phone number is a canonical Indian mobile number.
///
/// No normalization is applied: spaces, dashes or a missing `+` are rejected.
pub fn is_valid_india_mobile(phone: &str) -> bool {
    INDIA_MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for display and logs (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    if phone.len() >= 7 && phone.is_ascii() {
        format!(
            "{}****{}",
            &phone[0..3],
            &phone[phone.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
