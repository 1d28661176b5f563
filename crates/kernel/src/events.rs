use vigil_camera_registry::Camera;
use vigil_core_types::{AlertAction, CameraId, DetectionId};
use vigil_detection_log::Detection;

/// Notifications broadcast to subscribers after each effective state change.
#[derive(Clone, Debug)]
pub enum KernelEvent {
    DetectionProduced(Detection),
    DetectionMarked { id: DetectionId, action: AlertAction },
    CameraAdded(Camera),
    CameraUpdated(CameraId),
    CameraRemoved(CameraId),
    MaskedZonesSet { id: CameraId, zones: Vec<String> },
}
