// ── Core error types ──
//
// User-facing errors from vigil-core. Queries fail with `DataUnavailable`;
// mutations fail only when the referenced record does not exist or the
// service has been shut down.

use thiserror::Error;

use crate::model::{AlertId, CameraId};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Query errors ─────────────────────────────────────────────────
    #[error("Data unavailable: {operation} could not be loaded")]
    DataUnavailable { operation: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Alert not found: {id}")]
    AlertNotFound { id: AlertId },

    #[error("Camera not found: {id}")]
    CameraNotFound { id: CameraId },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Service is not running")]
    ServiceStopped,

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn unavailable(operation: &str) -> Self {
        Self::DataUnavailable {
            operation: operation.into(),
        }
    }

    /// Whether the error represents a failed data load (as opposed to a
    /// bad reference or a stopped service).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}
