// vigil-core: In-memory VMS data service and the view-models that consume it.

pub mod command;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod directory;
pub mod error;
pub mod generator;
pub mod model;
pub mod service;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::{LatencyProfile, ServiceConfig};
pub use detail::CameraDetail;
pub use directory::{CameraAction, CameraDirectory, LoadState, LoadTicket, PageWindow};
pub use error::CoreError;
pub use generator::Generator;
pub use service::{ServiceState, VmsService};
pub use store::DataStore;
pub use stream::{AlertQuery, AlertStatusFilter, CameraFilter, EntityStream, sort_alerts};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Core entities
    Alert, AlertId, Camera, CameraId, SystemStatus,
    // Enumerations
    AlertCategory, AlertSeverity, AlertStatus, CameraStatus, CameraType,
    // Notifications
    CameraEvent,
    // Dashboard projections
    CameraIssue, CameraSummary, DashboardData, RecentAlert,
    // Catalogs
    ALERT_CATALOG, LOCATIONS,
};
