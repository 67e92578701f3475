//! Common utility functions

pub mod data_uri;
pub mod phone;

// Re-export commonly used utilities
pub use data_uri::*;
pub use phone::*;
