//! Value objects carried between verification steps.

pub mod auth_token;
pub mod captured_image;
pub mod phone_number;
pub mod status;

pub use auth_token::{AuthToken, AUTH_TOKEN_MARKER};
pub use captured_image::{CapturedImage, ImageReference};
pub use phone_number::PhoneNumber;
pub use status::{FlowStep, LivenessStatus};
