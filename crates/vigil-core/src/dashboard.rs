// ── Dashboard aggregation ──
//
// Pure projections from store snapshots to `DashboardData`. The service
// applies gauge jitter before calling `aggregate`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{
    Alert, AlertCategory, Camera, CameraIssue, CameraStatus, CameraSummary, DashboardData,
    RecentAlert, SystemStatus,
};

/// Maximum number of camera issues shown.
pub const MAX_CAMERA_ISSUES: usize = 5;
/// Maximum number of recent alerts shown.
pub const MAX_RECENT_ALERTS: usize = 6;

/// Relative age of `ts` as seen at `now`.
///
/// Under a minute reads `"Just Now"`; then whole minutes, hours, or days.
/// Timestamps in the future count as "Just Now".
pub fn time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if elapsed.num_seconds() < 60 {
        "Just Now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

pub fn summarize(cameras: &[Arc<Camera>]) -> CameraSummary {
    cameras.iter().fold(
        CameraSummary {
            total: cameras.len(),
            ..CameraSummary::default()
        },
        |mut acc, cam| {
            match cam.status {
                CameraStatus::Online => acc.online += 1,
                CameraStatus::Offline => acc.offline += 1,
                CameraStatus::Warning => acc.warning += 1,
            }
            if cam.recording {
                acc.recording += 1;
            }
            acc
        },
    )
}

/// Offline or Warning cameras in store order, capped.
pub fn camera_issues(cameras: &[Arc<Camera>]) -> Vec<CameraIssue> {
    cameras
        .iter()
        .filter(|c| c.status.is_issue())
        .take(MAX_CAMERA_ISSUES)
        .map(|c| CameraIssue {
            id: c.id.clone(),
            name: c.name.clone(),
            location: c.location.clone(),
            status: c.status,
            time: c.last_seen.clone(),
        })
        .collect()
}

/// Unread, non-System alerts, newest first, capped.
///
/// System alerts are left out because they already surface as camera issues.
pub fn recent_alerts(alerts: &[Arc<Alert>], now: DateTime<Utc>) -> Vec<RecentAlert> {
    let mut unread: Vec<&Arc<Alert>> = alerts
        .iter()
        .filter(|a| a.status.is_unread() && a.category != AlertCategory::System)
        .collect();
    unread.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    unread
        .into_iter()
        .take(MAX_RECENT_ALERTS)
        .map(|a| RecentAlert {
            id: a.id,
            alert_type: a.alert_type.clone(),
            location: a.location.clone(),
            severity: a.severity,
            time: time_ago(a.timestamp, now),
        })
        .collect()
}

pub fn aggregate(
    cameras: &[Arc<Camera>],
    alerts: &[Arc<Alert>],
    system_status: SystemStatus,
    now: DateTime<Utc>,
) -> DashboardData {
    DashboardData {
        camera_summary: summarize(cameras),
        system_status,
        camera_issues: camera_issues(cameras),
        alerts: recent_alerts(alerts, now),
    }
}
