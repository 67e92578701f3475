//! Data URI helpers for captured selfies

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Prefix of a base64 baseline-JPEG data URI
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Wrap encoded JPEG bytes in a data URI
pub fn encode_jpeg_data_uri(jpeg: &[u8]) -> String {
    let mut uri = String::with_capacity(JPEG_DATA_URI_PREFIX.len() + jpeg.len() * 4 / 3 + 4);
    uri.push_str(JPEG_DATA_URI_PREFIX);
    STANDARD.encode_string(jpeg, &mut uri);
    uri
}

/// Check whether a payload carries the JPEG data URI prefix
pub fn is_jpeg_data_uri(payload: &str) -> bool {
    payload.starts_with(JPEG_DATA_URI_PREFIX)
}

/// Decode the bytes of a JPEG data URI, `None` when the prefix or base64 body is invalid
pub fn decode_jpeg_data_uri(payload: &str) -> Option<Vec<u8>> {
    let body = payload.strip_prefix(JPEG_DATA_URI_PREFIX)?;
    STANDARD.decode(body).ok()
}
