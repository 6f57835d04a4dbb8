// ── Alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{AlertId, CameraId};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AlertSeverity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AlertCategory {
    System,
    Security,
    Performance,
    Info,
}

/// Alert lifecycle status.
///
/// In practice alerts move `Unread -> Read -> Resolved`, or to `Deleted`
/// from any state. Nothing enforces the ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AlertStatus {
    Unread,
    Read,
    Resolved,
    Deleted,
}

impl AlertStatus {
    pub fn is_unread(self) -> bool {
        matches!(self, Self::Unread)
    }
}

/// A timestamped event attributed to a camera and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub location: String,
    pub camera_name: String,
    pub camera_id: CameraId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
    pub description: String,
}

/// One entry of the fixed alert catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTemplate {
    pub alert_type: &'static str,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
}

const fn template(
    alert_type: &'static str,
    severity: AlertSeverity,
    category: AlertCategory,
) -> AlertTemplate {
    AlertTemplate {
        alert_type,
        severity,
        category,
    }
}

/// Every alert the generator can emit.
pub const ALERT_CATALOG: [AlertTemplate; 10] = [
    template("Camera Offline", AlertSeverity::Critical, AlertCategory::System),
    template("Recording Stopped", AlertSeverity::Critical, AlertCategory::System),
    template("Storage Full", AlertSeverity::Critical, AlertCategory::System),
    template("Intrusion Detected", AlertSeverity::High, AlertCategory::Security),
    template("Motion in Restricted Area", AlertSeverity::High, AlertCategory::Security),
    template("Camera Tampering", AlertSeverity::High, AlertCategory::Security),
    template("High Latency", AlertSeverity::Medium, AlertCategory::Performance),
    template("FPS Drop", AlertSeverity::Medium, AlertCategory::Performance),
    template("Camera Reconnected", AlertSeverity::Low, AlertCategory::Info),
    template("User Login", AlertSeverity::Low, AlertCategory::Info),
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_serializes_as_epoch_millis() {
        let alert = Alert {
            id: AlertId(1001),
            alert_type: "FPS Drop".into(),
            severity: AlertSeverity::Medium,
            category: AlertCategory::Performance,
            location: "Lobby".into(),
            camera_name: "Camera 001".into(),
            camera_id: CameraId::from("cam-1"),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            status: AlertStatus::Unread,
            description: "Automated system alert generated due to fps drop.".into(),
        };

        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["timestamp"], 1_700_000_000_123_i64);
        assert_eq!(value["type"], "FPS Drop");
        assert_eq!(value["cameraId"], "cam-1");

        let back: Alert = serde_json::from_value(value).unwrap();
        assert_eq!(back, alert);
    }

    #[test]
    fn catalog_covers_every_category() {
        for category in [
            AlertCategory::System,
            AlertCategory::Security,
            AlertCategory::Performance,
            AlertCategory::Info,
        ] {
            assert!(ALERT_CATALOG.iter().any(|t| t.category == category));
        }
    }
}
