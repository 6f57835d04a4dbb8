// ── Dashboard projections ──
//
// Read-only shapes returned by `VmsService::get_dashboard_data`.

use serde::{Deserialize, Serialize};

use super::alert::AlertSeverity;
use super::camera::CameraStatus;
use super::entity_id::{AlertId, CameraId};
use super::system::SystemStatus;

/// Camera counts, recomputed from the store on every dashboard read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub warning: usize,
    pub recording: usize,
}

/// An Offline or Warning camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraIssue {
    pub id: CameraId,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    pub time: String,
}

/// A recent unread alert with a relative age string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentAlert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub location: String,
    pub severity: AlertSeverity,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub camera_summary: CameraSummary,
    pub system_status: SystemStatus,
    pub camera_issues: Vec<CameraIssue>,
    pub alerts: Vec<RecentAlert>,
}
