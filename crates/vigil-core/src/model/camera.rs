// ── Camera domain types ──

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use strum::{Display, EnumIter, EnumString};

use super::entity_id::CameraId;

/// Fixed location catalog. Camera `location` values come from this list.
pub const LOCATIONS: [&str; 8] = [
    "Building A",
    "Building B",
    "Parking Lot",
    "Main Entrance",
    "Lobby",
    "Warehouse",
    "Server Room",
    "Perimeter Fence",
];

/// Physical camera kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum CameraType {
    #[serde(rename = "IP")]
    #[strum(to_string = "IP")]
    Ip,
    #[serde(rename = "PTZ")]
    #[strum(to_string = "PTZ")]
    Ptz,
    Fisheye,
}

/// Connection status. Every camera is in exactly one of these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum CameraStatus {
    Online,
    Offline,
    Warning,
}

impl CameraStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    /// Offline and Warning cameras surface on the dashboard issue list.
    pub fn is_issue(self) -> bool {
        matches!(self, Self::Offline | Self::Warning)
    }
}

/// A monitored camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub camera_type: CameraType,
    pub status: CameraStatus,
    pub recording: bool,
    pub ai_enabled: bool,
    /// Human-readable "last seen" string, e.g. `"Just now"`.
    pub last_seen: String,
    pub ip: IpAddr,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn enum_names_match_wire_strings() {
        assert_eq!(CameraType::Ip.to_string(), "IP");
        assert_eq!(CameraType::Ptz.to_string(), "PTZ");
        assert_eq!("ptz".parse::<CameraType>().unwrap(), CameraType::Ptz);
        assert_eq!("warning".parse::<CameraStatus>().unwrap(), CameraStatus::Warning);
    }

    #[test]
    fn camera_serializes_camel_case() {
        let cam = Camera {
            id: CameraId::from("cam-1"),
            name: "Camera 001".into(),
            location: "Lobby".into(),
            camera_type: CameraType::Fisheye,
            status: CameraStatus::Online,
            recording: true,
            ai_enabled: false,
            last_seen: "Just now".into(),
            ip: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 101)),
        };
        let value = serde_json::to_value(&cam).unwrap();
        assert_eq!(value["type"], "Fisheye");
        assert_eq!(value["aiEnabled"], false);
        assert_eq!(value["lastSeen"], "Just now");
        assert_eq!(value["ip"], "192.168.1.101");
    }
}
