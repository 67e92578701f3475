//! Request DTOs for the mobile verification endpoints

pub mod mobile;

pub use mobile::{SendOtpRequest, UploadSelfieRequest, VerifyOtpRequest};
