//! Timed placeholder liveness analysis

use async_trait::async_trait;
use std::time::Duration;

use lid_shared::config::verification::LivenessConfig;

use super::traits::{LivenessAnalyzer, LivenessVerdict, MediaStream};

/// Passes unconditionally once a fixed window has elapsed
///
/// No frames are inspected. Stands in until a real analyzer is plugged in.
#[derive(Debug, Clone, Copy)]
pub struct TimedLivenessCheck {
    duration: Duration,
}

impl TimedLivenessCheck {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for TimedLivenessCheck {
    fn default() -> Self {
        Self::from(&LivenessConfig::default())
    }
}

impl From<&LivenessConfig> for TimedLivenessCheck {
    fn from(config: &LivenessConfig) -> Self {
        Self::new(Duration::from_millis(config.check_duration_ms))
    }
}

#[async_trait]
impl LivenessAnalyzer for TimedLivenessCheck {
    async fn analyze(&self, _stream: &mut dyn MediaStream) -> LivenessVerdict {
        tokio::time::sleep(self.duration).await;
        LivenessVerdict::Passed
    }
}
