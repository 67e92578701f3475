//! Simulated camera producing synthetic frames

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use lid_core::errors::CameraError;
use lid_core::services::{CameraDevice, FacingMode, Frame, MediaStream};

/// Default stream width in pixels
pub const DEFAULT_WIDTH: u32 = 640;

/// Default stream height in pixels
pub const DEFAULT_HEIGHT: u32 = 480;

/// Outcome of a camera permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CameraPermission {
    Granted = 0,
    Denied = 1,
    NoDevice = 2,
}

impl CameraPermission {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => CameraPermission::Granted,
            1 => CameraPermission::Denied,
            _ => CameraPermission::NoDevice,
        }
    }
}

/// Simulated front camera
///
/// Only one stream may be open at a time; a second acquisition fails with
/// [`CameraError::Busy`] until the first stream is stopped or dropped.
#[derive(Debug)]
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    permission: AtomicU8,
    in_use: Arc<AtomicBool>,
    acquisitions: AtomicU64,
}

impl SimulatedCamera {
    /// Create a camera streaming at the given resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            permission: AtomicU8::new(CameraPermission::Granted as u8),
            in_use: Arc::new(AtomicBool::new(false)),
            acquisitions: AtomicU64::new(0),
        }
    }

    /// Create a camera with a preset permission outcome
    pub fn with_permission(permission: CameraPermission) -> Self {
        let camera = Self::default();
        camera.set_permission(permission);
        camera
    }

    /// Change the outcome of later permission requests
    pub fn set_permission(&self, permission: CameraPermission) {
        self.permission.store(permission as u8, Ordering::SeqCst);
    }

    /// Current permission outcome
    pub fn permission(&self) -> CameraPermission {
        CameraPermission::from_u8(self.permission.load(Ordering::SeqCst))
    }

    /// Whether a stream is currently open
    pub fn is_in_use(&self) -> bool {
        self.in_use.load(Ordering::SeqCst)
    }

    /// Number of successful acquisitions
    pub fn acquisition_count(&self) -> u64 {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[async_trait]
impl CameraDevice for SimulatedCamera {
    async fn acquire(&self, facing: FacingMode) -> Result<Box<dyn MediaStream>, CameraError> {
        match self.permission() {
            CameraPermission::Denied => return Err(CameraError::PermissionDenied),
            CameraPermission::NoDevice => return Err(CameraError::NotFound),
            CameraPermission::Granted => {}
        }

        if self
            .in_use
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CameraError::Busy);
        }

        let acquisition = self.acquisitions.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            facing = ?facing,
            acquisition,
            width = self.width,
            height = self.height,
            "Simulated camera stream opened"
        );

        Ok(Box::new(SimulatedStream {
            width: self.width,
            height: self.height,
            in_use: self.in_use.clone(),
            active: true,
            frames: 0,
        }))
    }
}

/// Stream from a [`SimulatedCamera`]
///
/// Frames are a diagonal gradient that shifts with every grab.
pub struct SimulatedStream {
    width: u32,
    height: u32,
    in_use: Arc<AtomicBool>,
    active: bool,
    frames: u32,
}

impl MediaStream for SimulatedStream {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn grab_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.active {
            return Err(CameraError::Stream {
                message: "stream has been stopped".to_string(),
            });
        }

        let shift = self.frames;
        self.frames = self.frames.wrapping_add(1);

        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push((x.wrapping_add(shift) % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y) / 2 % 256) as u8);
            }
        }

        Ok(Frame::new(self.width, self.height, pixels))
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.in_use.store(false, Ordering::SeqCst);
            tracing::debug!("Simulated camera stream stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for SimulatedStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_and_grab_frame() {
        let camera = SimulatedCamera::new(32, 16);

        let mut stream = camera.acquire(FacingMode::User).await.unwrap();
        let frame = stream.grab_frame().unwrap();

        assert_eq!(stream.dimensions(), (32, 16));
        assert_eq!((frame.width, frame.height), (32, 16));
        assert_eq!(frame.pixels.len(), 32 * 16 * 3);
        assert!(camera.is_in_use());
    }

    #[tokio::test]
    async fn test_frames_change_between_grabs() {
        let camera = SimulatedCamera::new(8, 8);
        let mut stream = camera.acquire(FacingMode::User).await.unwrap();

        let first = stream.grab_frame().unwrap();
        let second = stream.grab_frame().unwrap();

        assert_ne!(first.pixels, second.pixels);
    }

    #[tokio::test]
    async fn test_permission_outcomes() {
        let camera = SimulatedCamera::with_permission(CameraPermission::Denied);
        assert_eq!(
            camera.acquire(FacingMode::User).await.err(),
            Some(CameraError::PermissionDenied)
        );

        camera.set_permission(CameraPermission::NoDevice);
        assert_eq!(
            camera.acquire(FacingMode::User).await.err(),
            Some(CameraError::NotFound)
        );
        assert!(!camera.is_in_use());
        assert_eq!(camera.acquisition_count(), 0);
    }

    #[tokio::test]
    async fn test_exclusive_access() {
        let camera = SimulatedCamera::new(8, 8);

        let mut stream = camera.acquire(FacingMode::User).await.unwrap();
        assert_eq!(
            camera.acquire(FacingMode::User).await.err(),
            Some(CameraError::Busy)
        );

        stream.stop();
        assert!(!camera.is_in_use());
        assert!(stream.grab_frame().is_err());

        let again = camera.acquire(FacingMode::User).await;
        assert!(again.is_ok());
    }

    #[tokio::test]
    async fn test_drop_releases_camera() {
        let camera = SimulatedCamera::new(8, 8);

        {
            let _stream = camera.acquire(FacingMode::User).await.unwrap();
            assert!(camera.is_in_use());
        }

        assert!(!camera.is_in_use());
    }
}
