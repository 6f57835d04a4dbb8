// ── Seed application logic ──
//
// Builds the DataStore from a freshly generated record set. Runs once at
// service construction; records then live for the service lifetime.

use super::DataStore;
use crate::model::{Alert, Camera, SystemStatus};

impl DataStore {
    /// A store holding exactly the provided records.
    ///
    /// Cameras are keyed by `CameraId`, alerts by `AlertId`; both keep the
    /// order in which they were generated.
    pub(crate) fn seeded(cameras: Vec<Camera>, alerts: Vec<Alert>, status: SystemStatus) -> Self {
        let store = Self::new(status);

        for camera in cameras {
            let key = camera.id.clone();
            store.cameras.upsert(key, camera);
        }

        for alert in alerts {
            store.alerts.upsert(alert.id, alert);
        }

        store
    }
}
