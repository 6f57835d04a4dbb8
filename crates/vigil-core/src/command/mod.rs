// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The
// service's command processor applies each one to the DataStore in
// arrival order.

use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{Alert, AlertId, Camera, CameraId};

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All possible write operations against the mock service.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Alert lifecycle ──────────────────────────────────────────────
    /// Unread -> Read. Any other status is left as is.
    AcknowledgeAlert { id: AlertId },
    /// Every Unread alert -> Read.
    AcknowledgeAllAlerts,
    /// Any status -> Resolved.
    ResolveAlert { id: AlertId },
    /// Any status -> Deleted. The record is kept.
    DeleteAlert { id: AlertId },

    // ── Camera operations ────────────────────────────────────────────
    UpdateCamera(Camera),
    DeleteCamera { id: CameraId },
}

impl Command {
    /// Short label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AcknowledgeAlert { .. } => "acknowledge_alert",
            Self::AcknowledgeAllAlerts => "acknowledge_all",
            Self::ResolveAlert { .. } => "resolve_alert",
            Self::DeleteAlert { .. } => "delete_alert",
            Self::UpdateCamera(_) => "update_camera",
            Self::DeleteCamera { .. } => "delete_camera",
        }
    }
}

/// Outcome of a successfully applied command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// The alert after the change.
    Alert(Arc<Alert>),
    /// Number of records changed.
    Count(usize),
    /// The camera after an update, or as it was before a delete.
    Camera(Arc<Camera>),
}
