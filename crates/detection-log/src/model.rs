use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vigil_core_types::{AlertAction, CameraId, DetectionId, ObjectClass, Zone};

/// One simulated observation event attributed to a camera.
///
/// `is_alert` is decided once at generation time and never recomputed; only
/// `action` and `comment` mutate afterwards. Camera name and zone are
/// denormalized snapshots taken at generation time, so the record stays
/// intact when the camera is later edited or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: DetectionId,
    pub timestamp: DateTime<Utc>,
    pub camera_id: CameraId,
    pub camera_name: String,
    pub object: ObjectClass,
    pub confidence: u8,
    pub zone: Zone,
    pub is_alert: bool,
    pub action: AlertAction,
    pub comment: Option<String>,
    pub snapshot: String,
    pub duration: f64,
    pub zone_masked: bool,
}

/// Constraints accepted by log queries; unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct DetectionFilter {
    pub camera: Option<CameraId>,
    pub zone: Option<Zone>,
    pub object: Option<ObjectClass>,
    pub action: Option<AlertAction>,
    pub alerts_only: bool,
}

impl DetectionFilter {
    pub fn matches(&self, detection: &Detection) -> bool {
        if let Some(camera) = &self.camera {
            if &detection.camera_id != camera {
                return false;
            }
        }
        if let Some(zone) = self.zone {
            if detection.zone != zone {
                return false;
            }
        }
        if let Some(object) = self.object {
            if detection.object != object {
                return false;
            }
        }
        if let Some(action) = self.action {
            if detection.action != action {
                return false;
            }
        }
        if self.alerts_only && !detection.is_alert {
            return false;
        }
        true
    }
}
