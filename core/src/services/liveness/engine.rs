//! Liveness capture state machine

use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::value_objects::{
    AuthToken, CapturedImage, ImageReference, LivenessStatus, PhoneNumber,
};
use crate::errors::{CameraError, LivenessError};
use crate::services::upload::UploadServiceTrait;

use super::config::LivenessEngineConfig;
use super::frame::encode_frame;
use super::session::CameraSession;
use super::traits::{CameraDevice, LivenessAnalyzer, LivenessVerdict};

/// Drives one liveness check and selfie capture for a verified phone number
///
/// Status transitions:
///
/// ```text
/// start ──> Pending ──confirm_ready──> Checking ──> Passed ──capture──> Uploading ──> Completed
///   │          ^                          │           ^                     │
///   │          └────────rejected──────────┘           └────upload failed────┘
///   └──> ErrorAcquiringCamera
/// ```
///
/// The camera is held from `start` until a capture hands the frame to the
/// uploader, or until the engine is dropped.
pub struct LivenessCaptureEngine<C, A, U>
where
    C: CameraDevice,
    A: LivenessAnalyzer,
    U: UploadServiceTrait,
{
    camera: Arc<C>,
    analyzer: Arc<A>,
    uploader: Arc<U>,
    config: LivenessEngineConfig,
    phone: PhoneNumber,
    token: AuthToken,
    session: Option<CameraSession>,
    status: watch::Sender<LivenessStatus>,
    camera_error: Option<CameraError>,
}

impl<C, A, U> LivenessCaptureEngine<C, A, U>
where
    C: CameraDevice,
    A: LivenessAnalyzer,
    U: UploadServiceTrait,
{
    /// Create an engine and acquire the camera
    ///
    /// Camera failure does not fail construction: the engine comes up in
    /// [`LivenessStatus::ErrorAcquiringCamera`] and must be replaced to retry.
    ///
    /// # Arguments
    ///
    /// * `camera` - Camera device to acquire
    /// * `analyzer` - Liveness analysis run on `confirm_ready`
    /// * `uploader` - Destination of the captured selfie
    /// * `phone` - Verified phone number
    /// * `token` - Auth token from OTP verification
    /// * `config` - Engine configuration
    pub async fn start(
        camera: Arc<C>,
        analyzer: Arc<A>,
        uploader: Arc<U>,
        phone: PhoneNumber,
        token: AuthToken,
        config: LivenessEngineConfig,
    ) -> Self {
        let (status, _) = watch::channel(LivenessStatus::Pending);
        let mut engine = Self {
            camera,
            analyzer,
            uploader,
            config,
            phone,
            token,
            session: None,
            status,
            camera_error: None,
        };

        match CameraSession::open(engine.camera.as_ref(), engine.config.facing_mode).await {
            Ok(session) => {
                tracing::info!(
                    phone = %engine.phone.masked(),
                    event = "liveness_started",
                    "Liveness check ready"
                );
                engine.session = Some(session);
            }
            Err(e) => {
                tracing::warn!(
                    phone = %engine.phone.masked(),
                    error = %e,
                    event = "camera_acquisition_failed",
                    "Could not access the camera"
                );
                engine.camera_error = Some(e);
                engine.set_status(LivenessStatus::ErrorAcquiringCamera);
            }
        }

        engine
    }

    /// Current status
    pub fn status(&self) -> LivenessStatus {
        *self.status.borrow()
    }

    /// Observe status changes while a suspending call runs
    pub fn subscribe(&self) -> watch::Receiver<LivenessStatus> {
        self.status.subscribe()
    }

    /// Why the camera could not be acquired, if it could not
    pub fn camera_error(&self) -> Option<&CameraError> {
        self.camera_error.as_ref()
    }

    /// Whether the engine currently holds a live camera stream
    pub fn holds_camera(&self) -> bool {
        self.session.as_ref().is_some_and(CameraSession::is_active)
    }

    /// Native dimensions of the held stream
    pub fn stream_dimensions(&self) -> Option<(u32, u32)> {
        self.session.as_ref().map(CameraSession::dimensions)
    }

    /// Phone number the selfie belongs to
    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Run the liveness analysis
    ///
    /// Valid only in `Pending`. Moves to `Checking` for the duration of the
    /// analysis, then to `Passed`, or back to `Pending` on rejection.
    /// Dropping the returned future mid-analysis also returns to `Pending`
    /// and releases the camera.
    pub async fn confirm_ready(&mut self) -> Result<(), LivenessError> {
        self.require(LivenessStatus::Pending)?;

        let mut session = self.take_or_open_session().await?;
        self.set_status(LivenessStatus::Checking);
        let rollback = StatusRollback::new(&self.status, LivenessStatus::Pending);

        let verdict = match session.stream_mut() {
            Some(stream) => self.analyzer.analyze(stream).await,
            None => LivenessVerdict::Rejected {
                reason: "camera stream is not available".to_string(),
            },
        };
        rollback.disarm();
        self.session = Some(session);

        match verdict {
            LivenessVerdict::Passed => {
                tracing::info!(
                    phone = %self.phone.masked(),
                    event = "liveness_passed",
                    "Liveness confirmed"
                );
                self.set_status(LivenessStatus::Passed);
                Ok(())
            }
            LivenessVerdict::Rejected { reason } => {
                tracing::warn!(
                    phone = %self.phone.masked(),
                    reason = %reason,
                    event = "liveness_rejected",
                    "Liveness not confirmed"
                );
                self.set_status(LivenessStatus::Pending);
                Err(LivenessError::Rejected { reason })
            }
        }
    }

    /// Capture a selfie and upload it
    ///
    /// Valid only in `Passed`. The frame is grabbed at the stream's native
    /// dimensions and encoded, then the camera is released before the upload
    /// starts. A failed or cancelled upload returns the engine to `Passed`;
    /// the next capture reacquires the camera.
    ///
    /// # Returns
    ///
    /// * `Ok(ImageReference)` - Upload accepted, engine is `Completed`
    /// * `Err(LivenessError)` - Engine stays in `Passed`
    pub async fn capture(&mut self) -> Result<ImageReference, LivenessError> {
        self.require(LivenessStatus::Passed)?;

        let mut session = self.take_or_open_session().await?;
        self.set_status(LivenessStatus::Uploading);
        let rollback = StatusRollback::new(&self.status, LivenessStatus::Passed);

        let image = match Self::grab_and_encode(&mut session, self.config.jpeg_quality) {
            Ok(image) => image,
            Err(e) => {
                rollback.disarm();
                self.session = Some(session);
                self.set_status(LivenessStatus::Passed);
                return Err(e);
            }
        };

        // Camera access ends here, before the upload is issued
        session.release();

        tracing::info!(
            phone = %self.phone.masked(),
            dimensions = ?image.dimensions(),
            event = "selfie_captured",
            "Selfie captured, camera released"
        );

        let uploaded = self.uploader.upload(&self.phone, image, &self.token).await;
        rollback.disarm();

        match uploaded {
            Ok(reference) => {
                self.set_status(LivenessStatus::Completed);
                Ok(reference)
            }
            Err(e) => {
                tracing::warn!(
                    phone = %self.phone.masked(),
                    error = %e,
                    event = "selfie_upload_failed",
                    "Selfie upload failed, capture may be retried"
                );
                self.set_status(LivenessStatus::Passed);
                Err(LivenessError::Upload(e))
            }
        }
    }

    /// Release the camera without changing status
    pub fn release_camera(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
        }
    }

    fn grab_and_encode(
        session: &mut CameraSession,
        quality: u8,
    ) -> Result<CapturedImage, LivenessError> {
        let stream = session.stream_mut().ok_or(CameraError::Stream {
            message: "stream already stopped".to_string(),
        })?;
        let frame = stream.grab_frame()?;
        encode_frame(&frame, quality)
    }

    /// Reuse the held session, or open a new one after a release
    async fn take_or_open_session(&mut self) -> Result<CameraSession, LivenessError> {
        if let Some(session) = self.session.take() {
            if session.is_active() {
                return Ok(session);
            }
        }

        CameraSession::open(self.camera.as_ref(), self.config.facing_mode)
            .await
            .map_err(|e| {
                tracing::warn!(
                    phone = %self.phone.masked(),
                    error = %e,
                    event = "camera_reacquisition_failed",
                    "Could not reacquire the camera"
                );
                LivenessError::CameraUnavailable(e)
            })
    }

    fn require(&self, expected: LivenessStatus) -> Result<(), LivenessError> {
        let status = self.status();
        if status == expected {
            Ok(())
        } else {
            Err(LivenessError::NotReady { status })
        }
    }

    fn set_status(&self, status: LivenessStatus) {
        let previous = self.status.send_replace(status);
        if previous != status {
            tracing::debug!(
                from = %previous,
                to = %status,
                "Liveness status changed"
            );
        }
    }
}

/// Puts the status back if a suspended step is dropped before finishing
struct StatusRollback<'a> {
    status: &'a watch::Sender<LivenessStatus>,
    restore: LivenessStatus,
    armed: bool,
}

impl<'a> StatusRollback<'a> {
    fn new(status: &'a watch::Sender<LivenessStatus>, restore: LivenessStatus) -> Self {
        Self {
            status,
            restore,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for StatusRollback<'_> {
    fn drop(&mut self) {
        if self.armed {
            let interrupted = self.status.send_replace(self.restore);
            tracing::debug!(
                from = %interrupted,
                to = %self.restore,
                event = "liveness_step_cancelled",
                "Liveness step cancelled"
            );
        }
    }
}

impl<C, A, U> std::fmt::Debug for LivenessCaptureEngine<C, A, U>
where
    C: CameraDevice,
    A: LivenessAnalyzer,
    U: UploadServiceTrait,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivenessCaptureEngine")
            .field("status", &self.status())
            .field("phone", &self.phone.masked())
            .field("session", &self.session)
            .field("camera_error", &self.camera_error)
            .finish()
    }
}
