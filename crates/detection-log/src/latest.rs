use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use vigil_core_types::CameraId;

use crate::model::Detection;

/// For each camera id, the detection with the greatest timestamp among log
/// entries referencing it. Cameras without detections are absent; detections
/// referencing cameras outside `camera_ids` are ignored, so a deleted camera
/// drops out of the index even while its log entries remain queryable.
pub fn index_latest(
    camera_ids: &[CameraId],
    detections: &[Detection],
) -> HashMap<CameraId, Detection> {
    let mut index: HashMap<CameraId, Detection> = HashMap::with_capacity(camera_ids.len());
    for detection in detections {
        if !camera_ids.contains(&detection.camera_id) {
            continue;
        }
        match index.get(&detection.camera_id) {
            Some(current) if current.timestamp >= detection.timestamp => {}
            _ => {
                index.insert(detection.camera_id.clone(), detection.clone());
            }
        }
    }
    index
}

#[derive(Clone)]
struct CacheEntry {
    registry_version: u64,
    log_version: u64,
    index: Arc<HashMap<CameraId, Detection>>,
}

/// Explicit memo over `index_latest`, keyed on the (registry, log) version
/// pair. Both inputs are immutable snapshots between updates, so a matching
/// key serves the cached index without rescanning the log.
#[derive(Default)]
pub struct LatestIndexCache {
    entry: RwLock<Option<CacheEntry>>,
}

impl LatestIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &self,
        registry_version: u64,
        log_version: u64,
        compute: impl FnOnce() -> HashMap<CameraId, Detection>,
    ) -> Arc<HashMap<CameraId, Detection>> {
        if let Some(entry) = self.entry.read().as_ref() {
            if entry.registry_version == registry_version && entry.log_version == log_version {
                return Arc::clone(&entry.index);
            }
        }
        let index = Arc::new(compute());
        *self.entry.write() = Some(CacheEntry {
            registry_version,
            log_version,
            index: Arc::clone(&index),
        });
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vigil_core_types::{AlertAction, DetectionId, ObjectClass, Zone};

    fn detection(seq: i64, camera: &str) -> Detection {
        Detection {
            id: DetectionId::new(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap(),
            camera_id: CameraId(camera.to_string()),
            camera_name: camera.to_string(),
            object: ObjectClass::Vehicle,
            confidence: 70,
            zone: Zone::Parking,
            is_alert: false,
            action: AlertAction::Pending,
            comment: None,
            snapshot: String::new(),
            duration: 1.5,
            zone_masked: false,
        }
    }

    #[test]
    fn picks_greatest_timestamp_per_camera() {
        let cameras = vec![CameraId("CAM-01".into()), CameraId("CAM-02".into())];
        let t1 = detection(1, "CAM-01");
        let other = detection(2, "CAM-02");
        let t2 = detection(3, "CAM-01");
        let t3 = detection(5, "CAM-01");
        let detections = vec![t3.clone(), other.clone(), t2, t1];

        let index = index_latest(&cameras, &detections);

        assert_eq!(index.get(&cameras[0]).unwrap().id, t3.id);
        assert_eq!(index.get(&cameras[1]).unwrap().id, other.id);
    }

    #[test]
    fn cameras_without_detections_are_absent() {
        let cameras = vec![CameraId("CAM-01".into()), CameraId("CAM-02".into())];
        let detections = vec![detection(1, "CAM-01")];

        let index = index_latest(&cameras, &detections);

        assert!(index.contains_key(&cameras[0]));
        assert!(!index.contains_key(&cameras[1]));
    }

    #[test]
    fn deleted_cameras_drop_out_of_the_index() {
        let detections = vec![detection(1, "CAM-01"), detection(2, "CAM-02")];

        let index = index_latest(&[CameraId("CAM-02".into())], &detections);

        assert_eq!(index.len(), 1);
        assert!(index.contains_key(&CameraId("CAM-02".into())));
    }

    #[test]
    fn cache_recomputes_only_when_a_version_moves() {
        let cache = LatestIndexCache::new();
        let computes = AtomicUsize::new(0);
        let compute = || {
            computes.fetch_add(1, Ordering::Relaxed);
            HashMap::new()
        };

        cache.get_or_compute(1, 1, compute);
        cache.get_or_compute(1, 1, compute);
        assert_eq!(computes.load(Ordering::Relaxed), 1);

        cache.get_or_compute(1, 2, compute);
        assert_eq!(computes.load(Ordering::Relaxed), 2);

        cache.get_or_compute(2, 2, compute);
        assert_eq!(computes.load(Ordering::Relaxed), 3);
    }
}
