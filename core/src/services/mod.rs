//! Verification services containing the step logic and the flow that sequences them.

pub mod flow;
pub mod liveness;
pub mod otp;
pub mod phone_validator;
pub mod upload;

// Re-export commonly used types
pub use flow::VerificationFlowController;
pub use liveness::{
    encode_frame, CameraDevice, CameraSession, FacingMode, Frame, LivenessAnalyzer,
    LivenessCaptureEngine, LivenessEngineConfig, LivenessVerdict, MediaStream, TimedLivenessCheck,
};
pub use otp::{
    ChallengeMode, ChallengeStoreTrait, CodeDeliveryTrait, OtpService, OtpServiceConfig,
    OtpServiceTrait,
};
pub use phone_validator::PhoneValidator;
pub use upload::{UploadService, UploadServiceConfig, UploadServiceTrait};
