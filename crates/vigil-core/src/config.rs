// ── Runtime service configuration ──
//
// These types describe how the mock service seeds and paces itself.
// They never touch disk: vigil-config (or a test) builds a
// `ServiceConfig` and hands it in.

use std::time::Duration;

use crate::error::CoreError;

/// Artificial latency applied before each operation resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub cameras: Duration,
    pub locations: Duration,
    pub dashboard: Duration,
    pub alerts: Duration,
    pub acknowledge: Duration,
    pub acknowledge_all: Duration,
    pub resolve: Duration,
    pub delete: Duration,
    pub camera_update: Duration,
}

impl LatencyProfile {
    /// No delay on any operation.
    pub const fn instant() -> Self {
        Self {
            cameras: Duration::ZERO,
            locations: Duration::ZERO,
            dashboard: Duration::ZERO,
            alerts: Duration::ZERO,
            acknowledge: Duration::ZERO,
            acknowledge_all: Duration::ZERO,
            resolve: Duration::ZERO,
            delete: Duration::ZERO,
            camera_update: Duration::ZERO,
        }
    }

    /// Multiply every delay by `factor` (0.0 disables latency).
    ///
    /// Fails when a scaled delay is not a representable `Duration`.
    pub fn scaled(self, factor: f64) -> Result<Self, CoreError> {
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() * factor.max(0.0)).map_err(|e| {
                CoreError::Config {
                    message: format!("latency scale {factor} is out of range: {e}"),
                }
            })
        };
        Ok(Self {
            cameras: scale(self.cameras)?,
            locations: scale(self.locations)?,
            dashboard: scale(self.dashboard)?,
            alerts: scale(self.alerts)?,
            acknowledge: scale(self.acknowledge)?,
            acknowledge_all: scale(self.acknowledge_all)?,
            resolve: scale(self.resolve)?,
            delete: scale(self.delete)?,
            camera_update: scale(self.camera_update)?,
        })
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            cameras: Duration::from_millis(600),
            locations: Duration::from_millis(200),
            dashboard: Duration::from_millis(800),
            alerts: Duration::from_millis(500),
            acknowledge: Duration::from_millis(200),
            acknowledge_all: Duration::from_millis(400),
            resolve: Duration::from_millis(200),
            delete: Duration::from_millis(200),
            camera_update: Duration::from_millis(200),
        }
    }
}

/// Configuration for a single mock service instance.
///
/// Built by the CLI or a test, passed to `VmsService::new`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Number of cameras generated at startup.
    pub camera_count: usize,
    /// Number of alerts generated at startup.
    pub alert_count: usize,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Probability that a generated alert starts out Unread.
    pub unread_probability: f64,
    /// Probability that any query fails with `DataUnavailable`.
    pub failure_rate: f64,
    /// Max absolute CPU / memory variation applied on each dashboard read.
    pub jitter_spread: u8,
    pub latency: LatencyProfile,
}

impl ServiceConfig {
    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("unread_probability", self.unread_probability),
            ("failure_rate", self.failure_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::Config {
                    message: format!("{field} must be within [0, 1], got {value}"),
                });
            }
        }
        if self.jitter_spread > 100 {
            return Err(CoreError::Config {
                message: format!("jitter_spread must be at most 100, got {}", self.jitter_spread),
            });
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            camera_count: 66,
            alert_count: 150,
            seed: None,
            unread_probability: 0.3,
            failure_rate: 0.0,
            jitter_spread: 5,
            latency: LatencyProfile::default(),
        }
    }
}
