//! Verification flow controller

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::VerificationResult;
use crate::domain::value_objects::{AuthToken, FlowStep, LivenessStatus, PhoneNumber};
use crate::errors::{FlowError, FlowResult, VerifyError};
use crate::services::liveness::{
    CameraDevice, LivenessAnalyzer, LivenessCaptureEngine, LivenessEngineConfig,
};
use crate::services::otp::OtpServiceTrait;
use crate::services::phone_validator::PhoneValidator;
use crate::services::upload::UploadServiceTrait;

/// Session data owned by each step
///
/// Holding the data inside the step makes a token without a phone number,
/// or a result without a token, unrepresentable.
enum Stage<C, A, U>
where
    C: CameraDevice,
    A: LivenessAnalyzer,
    U: UploadServiceTrait,
{
    PhoneEntry,
    OtpEntry {
        phone: PhoneNumber,
    },
    LivenessCheck {
        phone: PhoneNumber,
        token: AuthToken,
        engine: LivenessCaptureEngine<C, A, U>,
    },
    Complete {
        result: VerificationResult,
    },
}

impl<C, A, U> Stage<C, A, U>
where
    C: CameraDevice,
    A: LivenessAnalyzer,
    U: UploadServiceTrait,
{
    fn step(&self) -> FlowStep {
        match self {
            Stage::PhoneEntry => FlowStep::PhoneEntry,
            Stage::OtpEntry { .. } => FlowStep::OtpEntry,
            Stage::LivenessCheck { .. } => FlowStep::LivenessCheck,
            Stage::Complete { .. } => FlowStep::Complete,
        }
    }
}

/// Top-level state machine for one verification session
///
/// Steps advance `PhoneEntry -> OtpEntry -> LivenessCheck -> Complete`.
/// A failed action leaves the controller in the step it was in.
pub struct VerificationFlowController<O, U, C, A>
where
    O: OtpServiceTrait,
    U: UploadServiceTrait,
    C: CameraDevice,
    A: LivenessAnalyzer,
{
    otp_service: Arc<O>,
    upload_service: Arc<U>,
    camera: Arc<C>,
    analyzer: Arc<A>,
    liveness_config: LivenessEngineConfig,
    session_id: Uuid,
    stage: Stage<C, A, U>,
}

impl<O, U, C, A> VerificationFlowController<O, U, C, A>
where
    O: OtpServiceTrait,
    U: UploadServiceTrait,
    C: CameraDevice,
    A: LivenessAnalyzer,
{
    /// Create a controller at `PhoneEntry`
    ///
    /// # Arguments
    ///
    /// * `otp_service` - Sends and verifies one-time codes
    /// * `upload_service` - Receives the captured selfie
    /// * `camera` - Camera used by the liveness step
    /// * `analyzer` - Liveness analysis run before capture
    /// * `liveness_config` - Capture engine configuration
    pub fn new(
        otp_service: Arc<O>,
        upload_service: Arc<U>,
        camera: Arc<C>,
        analyzer: Arc<A>,
        liveness_config: LivenessEngineConfig,
    ) -> Self {
        Self {
            otp_service,
            upload_service,
            camera,
            analyzer,
            liveness_config,
            session_id: Uuid::new_v4(),
            stage: Stage::PhoneEntry,
        }
    }

    /// Identifier of the current session, renewed on reset
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current step
    pub fn step(&self) -> FlowStep {
        self.stage.step()
    }

    /// Phone number submitted for this session
    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        match &self.stage {
            Stage::PhoneEntry => None,
            Stage::OtpEntry { phone } | Stage::LivenessCheck { phone, .. } => Some(phone),
            Stage::Complete { result } => Some(&result.phone_number),
        }
    }

    /// Auth token, held only during the liveness step
    pub fn auth_token(&self) -> Option<&AuthToken> {
        match &self.stage {
            Stage::LivenessCheck { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Status of the liveness engine, during the liveness step
    pub fn liveness_status(&self) -> Option<LivenessStatus> {
        match &self.stage {
            Stage::LivenessCheck { engine, .. } => Some(engine.status()),
            _ => None,
        }
    }

    /// Liveness engine of the current session, during the liveness step
    pub fn liveness_engine(&self) -> Option<&LivenessCaptureEngine<C, A, U>> {
        match &self.stage {
            Stage::LivenessCheck { engine, .. } => Some(engine),
            _ => None,
        }
    }

    /// Outcome of a completed session
    pub fn result(&self) -> Option<&VerificationResult> {
        match &self.stage {
            Stage::Complete { result } => Some(result),
            _ => None,
        }
    }

    /// Submit a phone number and request a code
    ///
    /// Valid in `PhoneEntry`; advances to `OtpEntry` once the code was sent.
    pub async fn submit_phone(&mut self, raw_phone: &str) -> FlowResult<()> {
        self.require(FlowStep::PhoneEntry)?;

        let phone = PhoneValidator::validate(raw_phone).map_err(|e| {
            tracing::warn!(
                session_id = %self.session_id,
                event = "phone_rejected",
                "Phone number rejected"
            );
            e
        })?;

        self.otp_service.send(&phone).await?;

        tracing::info!(
            session_id = %self.session_id,
            phone = %phone.masked(),
            event = "flow_otp_entry",
            "Code sent, awaiting OTP"
        );
        self.stage = Stage::OtpEntry { phone };
        Ok(())
    }

    /// Submit the received code
    ///
    /// Valid in `OtpEntry`; on success stores the token, starts the liveness
    /// engine and advances to `LivenessCheck`. A camera failure does not
    /// block the transition; it shows as `ErrorAcquiringCamera`.
    pub async fn submit_code(&mut self, code: &str) -> FlowResult<()> {
        let Stage::OtpEntry { phone } = &self.stage else {
            return Err(unexpected(FlowStep::OtpEntry, self.step()));
        };
        let phone = phone.clone();

        let token = self.otp_service.verify(&phone, code).await?;
        if token.is_empty() {
            return Err(VerifyError::InvalidOrExpired.into());
        }

        let engine = self.start_engine(phone.clone(), token.clone()).await;

        tracing::info!(
            session_id = %self.session_id,
            phone = %phone.masked(),
            liveness_status = %engine.status(),
            event = "flow_liveness_check",
            "OTP verified, starting liveness check"
        );
        self.stage = Stage::LivenessCheck {
            phone,
            token,
            engine,
        };
        Ok(())
    }

    /// Confirm the user is ready and run the liveness analysis
    pub async fn confirm_liveness(&mut self) -> FlowResult<()> {
        let actual = self.step();
        match &mut self.stage {
            Stage::LivenessCheck { engine, .. } => Ok(engine.confirm_ready().await?),
            _ => Err(unexpected(FlowStep::LivenessCheck, actual)),
        }
    }

    /// Capture and upload the selfie
    ///
    /// On success stores the image reference and advances to `Complete`.
    /// A failed capture leaves the engine in `Passed` for another attempt.
    pub async fn capture_selfie(&mut self) -> FlowResult<VerificationResult> {
        let actual = self.step();
        let (phone, reference) = match &mut self.stage {
            Stage::LivenessCheck { phone, engine, .. } => (phone.clone(), engine.capture().await?),
            _ => return Err(unexpected(FlowStep::LivenessCheck, actual)),
        };

        tracing::info!(
            session_id = %self.session_id,
            phone = %phone.masked(),
            image_url = %reference,
            event = "flow_complete",
            "Verification complete"
        );

        let result = VerificationResult::new(phone, reference);
        self.stage = Stage::Complete {
            result: result.clone(),
        };
        Ok(result)
    }

    /// Replace the liveness engine with a fresh one
    ///
    /// The retry path after a camera error. The old engine releases the
    /// camera before the new one requests it.
    pub async fn restart_liveness(&mut self) -> FlowResult<LivenessStatus> {
        let actual = self.step();
        let (phone, token) = match &mut self.stage {
            Stage::LivenessCheck {
                phone,
                token,
                engine,
            } => {
                engine.release_camera();
                (phone.clone(), token.clone())
            }
            _ => return Err(unexpected(FlowStep::LivenessCheck, actual)),
        };

        let replacement = self.start_engine(phone, token).await;
        let status = replacement.status();

        if let Stage::LivenessCheck { engine, .. } = &mut self.stage {
            *engine = replacement;
        }

        tracing::info!(
            session_id = %self.session_id,
            liveness_status = %status,
            event = "liveness_restarted",
            "Liveness check restarted"
        );
        Ok(status)
    }

    /// Return from `OtpEntry` to `PhoneEntry`, forgetting the phone number
    pub fn back(&mut self) -> FlowResult<()> {
        self.require(FlowStep::OtpEntry)?;
        self.stage = Stage::PhoneEntry;

        tracing::debug!(
            session_id = %self.session_id,
            event = "flow_back",
            "Returned to phone entry"
        );
        Ok(())
    }

    /// Discard all session data and return to `PhoneEntry`
    ///
    /// Valid from any step. A held camera is released.
    pub fn reset(&mut self) {
        let previous = self.step();
        self.stage = Stage::PhoneEntry;
        self.session_id = Uuid::new_v4();

        tracing::info!(
            session_id = %self.session_id,
            from = %previous,
            event = "flow_reset",
            "Verification session reset"
        );
    }

    async fn start_engine(
        &self,
        phone: PhoneNumber,
        token: AuthToken,
    ) -> LivenessCaptureEngine<C, A, U> {
        LivenessCaptureEngine::start(
            self.camera.clone(),
            self.analyzer.clone(),
            self.upload_service.clone(),
            phone,
            token,
            self.liveness_config.clone(),
        )
        .await
    }

    fn require(&self, expected: FlowStep) -> FlowResult<()> {
        let actual = self.step();
        if actual == expected {
            Ok(())
        } else {
            Err(unexpected(expected, actual))
        }
    }
}

fn unexpected(expected: FlowStep, actual: FlowStep) -> FlowError {
    FlowError::UnexpectedStep { expected, actual }
}
