// ── Central reactive data store ──
//
// The single canonical record set: cameras, alerts, and system gauges.
// Camera and alert mutations are broadcast to subscribers via `watch`
// channels. The gauges are fixed once seeded.

use std::sync::Arc;

use super::collection::EntityCollection;
use crate::model::{Alert, AlertId, AlertStatus, Camera, CameraId, SystemStatus};
use crate::stream::EntityStream;

/// Central reactive store for all VMS records.
///
/// Owned by the service and handed to consumers by reference; there is
/// no ambient global. Reads are cheap `Arc` snapshot clones.
pub struct DataStore {
    pub(crate) cameras: EntityCollection<CameraId, Camera>,
    pub(crate) alerts: EntityCollection<AlertId, Alert>,
    system_status: SystemStatus,
}

impl DataStore {
    /// An empty store reporting `system_status`.
    pub(crate) fn new(system_status: SystemStatus) -> Self {
        Self {
            cameras: EntityCollection::new(),
            alerts: EntityCollection::new(),
            system_status,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn cameras_snapshot(&self) -> Arc<Vec<Arc<Camera>>> {
        self.cameras.snapshot()
    }

    pub fn alerts_snapshot(&self) -> Arc<Vec<Arc<Alert>>> {
        self.alerts.snapshot()
    }

    /// The canonical (un-jittered) system gauges.
    pub fn system_status(&self) -> SystemStatus {
        self.system_status.clone()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn camera_by_id(&self, id: &CameraId) -> Option<Arc<Camera>> {
        self.cameras.get(id)
    }

    pub fn alert_by_id(&self, id: AlertId) -> Option<Arc<Alert>> {
        self.alerts.get(&id)
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_cameras(&self) -> EntityStream<Camera> {
        EntityStream::new(self.cameras.subscribe())
    }

    pub fn subscribe_alerts(&self) -> EntityStream<Alert> {
        EntityStream::new(self.alerts.subscribe())
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Set an alert's status. Returns the status it had before, or `None`
    /// if no alert has that id.
    pub(crate) fn set_alert_status(&self, id: AlertId, status: AlertStatus) -> Option<AlertStatus> {
        self.alerts.modify(&id, |alert| {
            let previous = alert.status;
            alert.status = status;
            previous
        })
    }

    /// Move an Unread alert to Read. Returns `Some(true)` if it changed,
    /// `Some(false)` if it was not Unread, `None` if it does not exist.
    pub(crate) fn mark_alert_read(&self, id: AlertId) -> Option<bool> {
        let alert = self.alerts.get(&id)?;
        if !alert.status.is_unread() {
            return Some(false);
        }
        self.alerts.modify(&id, |alert| {
            let was_unread = alert.status.is_unread();
            if was_unread {
                alert.status = AlertStatus::Read;
            }
            was_unread
        })
    }

    /// Move every Unread alert to Read. Returns how many changed.
    pub(crate) fn mark_all_alerts_read(&self) -> usize {
        self.alerts.modify_where(
            |alert| alert.status.is_unread(),
            |alert| alert.status = AlertStatus::Read,
        )
    }

    /// Replace an existing camera. Returns `false` if the id is unknown.
    pub(crate) fn update_camera(&self, camera: Camera) -> bool {
        if self.cameras.get(&camera.id).is_none() {
            return false;
        }
        self.cameras.upsert(camera.id.clone(), camera);
        true
    }

    pub(crate) fn remove_camera(&self, id: &CameraId) -> Option<Arc<Camera>> {
        self.cameras.remove(id)
    }
}
