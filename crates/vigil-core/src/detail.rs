// ── Camera settings view-model ──
//
// Edits a private copy of one camera. Nothing reaches the store until
// `save` or `confirm_delete` pushes the change through the service, which
// then notifies every directory listening for camera events.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::Camera;
use crate::service::VmsService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDetail {
    camera: Camera,
    delete_modal_open: bool,
}

impl CameraDetail {
    /// Start editing a copy of `camera` with the delete prompt hidden.
    pub fn open(camera: &Camera) -> Self {
        debug!(id = %camera.id, "opening camera settings");
        Self {
            camera: camera.clone(),
            delete_modal_open: false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the working copy.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn delete_modal_open(&self) -> bool {
        self.delete_modal_open
    }

    /// Show the delete confirmation prompt.
    pub fn request_delete(&mut self) {
        self.delete_modal_open = true;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_modal_open = false;
    }

    /// Commit the edited copy and close the panel.
    ///
    /// On error the panel stays open so the edit is not lost.
    pub async fn save(self, service: &VmsService) -> Result<Arc<Camera>, (Self, CoreError)> {
        match service.update_camera(self.camera.clone()).await {
            Ok(updated) => {
                info!(id = %updated.id, name = %updated.name, "camera settings saved");
                Ok(updated)
            }
            Err(e) => Err((self, e)),
        }
    }

    /// Delete the camera and close the panel.
    ///
    /// Fails with `ValidationFailed` unless the confirmation prompt is
    /// showing. On error the panel stays open with the prompt hidden.
    pub async fn confirm_delete(
        mut self,
        service: &VmsService,
    ) -> Result<Arc<Camera>, (Self, CoreError)> {
        if !self.delete_modal_open {
            return Err((
                self,
                CoreError::ValidationFailed {
                    message: "delete was not requested".into(),
                },
            ));
        }

        self.delete_modal_open = false;
        match service.delete_camera(self.camera.id.clone()).await {
            Ok(removed) => Ok(removed),
            Err(e) => Err((self, e)),
        }
    }
}
