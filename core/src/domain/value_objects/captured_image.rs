//! Captured selfie frame and the reference returned after upload

use serde::{Deserialize, Serialize};
use std::fmt;

use lid_shared::utils::data_uri::{encode_jpeg_data_uri, is_jpeg_data_uri};

/// A still frame encoded as a data URI
///
/// Exists only between capture and upload; the upload call takes it by value.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    data_uri: String,
    dimensions: Option<(u32, u32)>,
}

impl CapturedImage {
    /// Wrap encoded JPEG bytes captured at the given dimensions
    pub fn from_jpeg_bytes(jpeg: &[u8], width: u32, height: u32) -> Self {
        Self {
            data_uri: encode_jpeg_data_uri(jpeg),
            dimensions: Some((width, height)),
        }
    }

    /// Wrap a data URI received from outside without checking it
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
            dimensions: None,
        }
    }

    /// Get the data URI
    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Whether the payload is a base64 JPEG data URI
    pub fn is_jpeg_data_uri(&self) -> bool {
        is_jpeg_data_uri(&self.data_uri)
    }

    /// Pixel dimensions, known only for locally captured frames
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

// Data URIs run to hundreds of kilobytes; keep them out of logs.
impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("len", &self.data_uri.len())
            .field("jpeg", &self.is_jpeg_data_uri())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

/// Opaque reference to an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Resource locator of the stored image
    pub url: String,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
}

impl ImageReference {
    /// Create a new image reference
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
