// ── Synthetic record generator ──
//
// Produces the camera and alert sets the service seeds itself with.
// Randomness comes from an injected `rand::Rng`, so a fixed seed yields
// a fixed data set.

use std::net::{IpAddr, Ipv4Addr};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::model::{
    ALERT_CATALOG, Alert, AlertId, AlertStatus, Camera, CameraId, CameraStatus, CameraType,
    LOCATIONS,
};

/// First generated alert id.
pub const FIRST_ALERT_ID: u32 = 1001;

/// Alerts are spread uniformly over this window before "now".
const ALERT_WINDOW_MS: i64 = 48 * 60 * 60 * 1000;

const CAMERA_TYPES: [CameraType; 3] = [CameraType::Ip, CameraType::Ptz, CameraType::Fisheye];

/// Base address; camera `n` gets `BASE_IP + n`.
const BASE_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 100);

/// Seedable generator for cameras, alerts, and gauge jitter.
#[derive(Debug)]
pub struct Generator<R> {
    rng: R,
}

impl Generator<StdRng> {
    /// Deterministic generator: same seed, same records.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw `true` with probability `p`. Out-of-range values are clamped.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Generate `count` cameras with ids `cam-1..=cam-{count}`.
    pub fn cameras(&mut self, count: usize) -> Vec<Camera> {
        (1..=count).map(|n| self.camera(n)).collect()
    }

    fn camera(&mut self, n: usize) -> Camera {
        let offline = self.rng.random::<f64>() > 0.9;
        let warning = !offline && self.rng.random::<f64>() > 0.8;
        let status = if offline {
            CameraStatus::Offline
        } else if warning {
            CameraStatus::Warning
        } else {
            CameraStatus::Online
        };

        let location = LOCATIONS.choose(&mut self.rng).copied().unwrap_or(LOCATIONS[0]);
        let camera_type = CAMERA_TYPES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CameraType::Ip);

        Camera {
            id: CameraId::sequential(n),
            name: format!("Camera {n:03}"),
            location: location.to_owned(),
            camera_type,
            status,
            recording: self.chance(0.9),
            ai_enabled: self.chance(0.5),
            last_seen: if offline { "2 hours ago" } else { "Just now" }.to_owned(),
            ip: camera_ip(n),
        }
    }

    /// Generate `count` alerts attributed to random cameras, timestamped
    /// within the 48 hours before `now`.
    ///
    /// Each alert starts Unread with probability `unread_probability`,
    /// otherwise Read. With no cameras to attribute to, nothing is produced.
    pub fn alerts(
        &mut self,
        count: usize,
        cameras: &[Camera],
        now: DateTime<Utc>,
        unread_probability: f64,
    ) -> Vec<Alert> {
        if cameras.is_empty() {
            return Vec::new();
        }

        (FIRST_ALERT_ID..)
            .take(count)
            .filter_map(|id| {
                let template = ALERT_CATALOG.choose(&mut self.rng).copied()?;
                let camera = cameras.choose(&mut self.rng)?;
                let offset = self.rng.random_range(0..ALERT_WINDOW_MS);
                let status = if self.chance(unread_probability) {
                    AlertStatus::Unread
                } else {
                    AlertStatus::Read
                };

                Some(Alert {
                    id: AlertId(id),
                    alert_type: template.alert_type.to_owned(),
                    severity: template.severity,
                    category: template.category,
                    location: camera.location.clone(),
                    camera_name: camera.name.clone(),
                    camera_id: camera.id.clone(),
                    timestamp: now - Duration::milliseconds(offset),
                    status,
                    description: format!(
                        "Automated system alert generated due to {}.",
                        template.alert_type.to_lowercase()
                    ),
                })
            })
            .collect()
    }

    /// Shift a percentage gauge by a random amount in `[-spread, +spread]`,
    /// clamped to `0..=100`.
    pub fn jitter(&mut self, value: u8, spread: u8) -> u8 {
        let spread = i16::from(spread);
        let delta = self.rng.random_range(-spread..=spread);
        let shifted = (i16::from(value) + delta).clamp(0, 100);
        u8::try_from(shifted).unwrap_or(100)
    }
}

/// Address of camera `n`; carries into the third octet past `.255`.
fn camera_ip(n: usize) -> IpAddr {
    let offset = u32::try_from(n).unwrap_or(u32::MAX);
    let raw = u32::from(BASE_IP).saturating_add(offset);
    IpAddr::V4(Ipv4Addr::from(raw))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AlertCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cameras_have_sequential_ids_and_padded_names() {
        let cams = Generator::seeded(1).cameras(66);
        assert_eq!(cams.len(), 66);
        assert_eq!(cams[0].id.as_str(), "cam-1");
        assert_eq!(cams[0].name, "Camera 001");
        assert_eq!(cams[65].id.as_str(), "cam-66");
        assert_eq!(cams[65].name, "Camera 066");
        assert!(cams.iter().all(|c| LOCATIONS.contains(&c.location.as_str())));
    }

    #[test]
    fn camera_ip_offsets_from_base() {
        assert_eq!(camera_ip(1).to_string(), "192.168.1.101");
        assert_eq!(camera_ip(155).to_string(), "192.168.1.255");
        assert_eq!(camera_ip(156).to_string(), "192.168.2.0");
    }

    #[test]
    fn offline_cameras_were_seen_hours_ago() {
        let cams = Generator::seeded(3).cameras(200);
        for cam in &cams {
            let expected = if cam.status == CameraStatus::Offline {
                "2 hours ago"
            } else {
                "Just now"
            };
            assert_eq!(cam.last_seen, expected);
        }
    }

    #[test]
    fn same_seed_same_records() {
        let now = Utc::now();
        let mut a = Generator::seeded(42);
        let mut b = Generator::seeded(42);
        let cams_a = a.cameras(30);
        let cams_b = b.cameras(30);
        assert_eq!(cams_a, cams_b);
        assert_eq!(
            a.alerts(50, &cams_a, now, 0.3),
            b.alerts(50, &cams_b, now, 0.3)
        );
    }

    #[test]
    fn status_ratios_are_roughly_as_drawn() {
        let cams = Generator::seeded(11).cameras(10_000);
        let offline = cams.iter().filter(|c| c.status == CameraStatus::Offline).count();
        let warning = cams.iter().filter(|c| c.status == CameraStatus::Warning).count();
        let recording = cams.iter().filter(|c| c.recording).count();

        // ~10% offline, ~18% warning, ~90% recording.
        assert!((800..1200).contains(&offline), "offline = {offline}");
        assert!((1500..2100).contains(&warning), "warning = {warning}");
        assert!((8700..9300).contains(&recording), "recording = {recording}");
    }

    #[test]
    fn alerts_borrow_camera_fields_and_stay_in_window() {
        let now = Utc::now();
        let mut generator = Generator::seeded(5);
        let cams = generator.cameras(10);
        let alerts = generator.alerts(150, &cams, now, 0.3);

        assert_eq!(alerts.len(), 150);
        assert_eq!(alerts[0].id, AlertId(1001));
        assert_eq!(alerts[149].id, AlertId(1150));

        for alert in &alerts {
            let cam = cams.iter().find(|c| c.id == alert.camera_id).unwrap();
            assert_eq!(alert.location, cam.location);
            assert_eq!(alert.camera_name, cam.name);
            assert!(alert.timestamp <= now);
            assert!(alert.timestamp > now - Duration::hours(48));
            assert!(matches!(alert.status, AlertStatus::Unread | AlertStatus::Read));

            let template = ALERT_CATALOG
                .iter()
                .find(|t| t.alert_type == alert.alert_type)
                .unwrap();
            assert_eq!(alert.severity, template.severity);
            assert_eq!(alert.category, template.category);
        }
    }

    #[test]
    fn description_lowercases_type() {
        let mut generator = Generator::seeded(9);
        let cams = generator.cameras(1);
        let alert = &generator.alerts(1, &cams, Utc::now(), 0.3)[0];
        assert_eq!(
            alert.description,
            format!(
                "Automated system alert generated due to {}.",
                alert.alert_type.to_lowercase()
            )
        );
    }

    #[test]
    fn unread_probability_controls_initial_status() {
        let mut generator = Generator::seeded(21);
        let cams = generator.cameras(5);
        let now = Utc::now();

        let all_unread = generator.alerts(40, &cams, now, 1.0);
        assert!(all_unread.iter().all(|a| a.status == AlertStatus::Unread));
        let none_unread = generator.alerts(40, &cams, now, 0.0);
        assert!(none_unread.iter().all(|a| a.status == AlertStatus::Read));

        let mixed = generator.alerts(5000, &cams, now, 0.3);
        let unread = mixed.iter().filter(|a| a.status.is_unread()).count();
        assert!((1300..1700).contains(&unread), "unread = {unread}");
    }

    #[test]
    fn no_cameras_means_no_alerts() {
        let alerts = Generator::seeded(1).alerts(10, &[], Utc::now(), 0.3);
        assert!(alerts.is_empty());
    }

    #[test]
    fn every_category_is_reachable() {
        let mut generator = Generator::seeded(2);
        let cams = generator.cameras(3);
        let alerts = generator.alerts(500, &cams, Utc::now(), 0.3);
        for category in [
            AlertCategory::System,
            AlertCategory::Security,
            AlertCategory::Performance,
            AlertCategory::Info,
        ] {
            assert!(alerts.iter().any(|a| a.category == category));
        }
    }

    #[test]
    fn jitter_stays_within_spread_and_bounds() {
        let mut generator = Generator::seeded(8);
        for _ in 0..500 {
            let v = generator.jitter(50, 5);
            assert!((45..=55).contains(&v));
            assert!(generator.jitter(2, 5) <= 7);
            assert!(generator.jitter(98, 5) <= 100);
        }
        assert_eq!(generator.jitter(0, 0), 0);
        assert_eq!(generator.jitter(100, 0), 100);
    }
}
