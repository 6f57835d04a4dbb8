// ── Domain model ──
//
// Canonical record types held by the DataStore and the read-only
// projections derived from them.

pub mod alert;
pub mod camera;
pub mod dashboard;
pub mod entity_id;
pub mod event;
pub mod system;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use vigil_core::model::*` gives you everything.

pub use entity_id::{AlertId, CameraId};

pub use camera::{Camera, CameraStatus, CameraType, LOCATIONS};

pub use alert::{ALERT_CATALOG, Alert, AlertCategory, AlertSeverity, AlertStatus, AlertTemplate};

pub use system::SystemStatus;

pub use event::CameraEvent;

pub use dashboard::{CameraIssue, CameraSummary, DashboardData, RecentAlert};
