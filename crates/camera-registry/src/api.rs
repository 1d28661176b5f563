use async_trait::async_trait;
use vigil_core_types::CameraId;

use crate::model::{Camera, NewCamera};

#[async_trait]
pub trait CameraRegistry: Send + Sync {
    /// Adds a camera, assigning the next free zero-padded id. The record is
    /// forced online with a freshly sampled accuracy.
    async fn add(&self, data: NewCamera) -> Camera;
    /// Replaces the record matching `camera.id`. Returns whether a record
    /// was found; an unknown id is a silent no-op.
    async fn update(&self, camera: Camera) -> bool;
    /// Removes the record. Idempotent; an unknown id is a silent no-op.
    async fn remove(&self, id: &CameraId) -> bool;
    /// Replaces the masked-zone set for a camera; an unknown id is a silent
    /// no-op.
    async fn set_masked_zones(&self, id: &CameraId, zones: Vec<String>) -> bool;
    async fn get(&self, id: &CameraId) -> Option<Camera>;
    /// Cloned snapshot of the fleet, ordered by id.
    async fn list(&self) -> Vec<Camera>;
}
