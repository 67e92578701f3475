//! Raw frames and their JPEG data URI encoding

use jpeg_encoder::{ColorType, Encoder};

use crate::domain::value_objects::CapturedImage;
use crate::errors::LivenessError;

/// Bytes per packed RGB pixel
const RGB_CHANNELS: usize = 3;

/// A single video frame as packed 8-bit RGB
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame from packed RGB pixels
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A frame filled with one color
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgb.iter().copied().cycle().take(count * RGB_CHANNELS).collect();
        Self::new(width, height, pixels)
    }

    /// Expected buffer length for the frame dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * RGB_CHANNELS
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Encode a frame as a baseline JPEG data URI
///
/// # Arguments
///
/// * `frame` - Frame at the stream's native dimensions
/// * `quality` - JPEG quality, 1-100
pub fn encode_frame(frame: &Frame, quality: u8) -> Result<CapturedImage, LivenessError> {
    let encoding_error = |message: String| LivenessError::Encoding { message };

    if frame.width == 0 || frame.height == 0 {
        return Err(encoding_error(format!(
            "frame has no pixels ({}x{})",
            frame.width, frame.height
        )));
    }
    if frame.pixels.len() != frame.expected_len() {
        return Err(encoding_error(format!(
            "expected {} bytes for {}x{} RGB, got {}",
            frame.expected_len(),
            frame.width,
            frame.height,
            frame.pixels.len()
        )));
    }

    let width = u16::try_from(frame.width)
        .map_err(|_| encoding_error(format!("width {} exceeds JPEG limits", frame.width)))?;
    let height = u16::try_from(frame.height)
        .map_err(|_| encoding_error(format!("height {} exceeds JPEG limits", frame.height)))?;

    let mut jpeg = Vec::new();
    Encoder::new(&mut jpeg, quality.clamp(1, 100))
        .encode(&frame.pixels, width, height, ColorType::Rgb)
        .map_err(|e| encoding_error(e.to_string()))?;

    Ok(CapturedImage::from_jpeg_bytes(&jpeg, frame.width, frame.height))
}
