// ── Camera change notifications ──

use std::sync::Arc;

use super::camera::Camera;
use super::entity_id::CameraId;

/// Broadcast after a camera mutation commits to the store.
///
/// Fire-and-forget: receivers that lag or drop simply miss events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    /// The camera's new value.
    Updated(Arc<Camera>),
    /// The camera as it was when removed.
    Deleted(Arc<Camera>),
}

impl CameraEvent {
    pub fn camera(&self) -> &Arc<Camera> {
        match self {
            Self::Updated(camera) | Self::Deleted(camera) => camera,
        }
    }

    pub fn camera_id(&self) -> &CameraId {
        &self.camera().id
    }
}
