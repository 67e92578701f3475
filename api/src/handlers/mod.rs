//! Error mapping from step errors to HTTP responses

pub mod error;

pub use error::{json_error_handler, ApiError};
