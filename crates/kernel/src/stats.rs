use vigil_camera_registry::Camera;
use vigil_core_types::{AlertAction, CameraId, Zone};
use vigil_detection_log::Detection;

/// Cameras below this simulated accuracy are surfaced for attention.
pub const LOW_ACCURACY_THRESHOLD: f64 = 40.0;

/// Headline counters for the dashboard view.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelStats {
    /// Alerts still awaiting operator disposition.
    pub active_alerts: usize,
    pub online_cameras: usize,
    /// Detections an operator marked as false, alert or not.
    pub false_alerts: usize,
    pub total_detections: usize,
    pub low_accuracy: Vec<CameraAccuracy>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraAccuracy {
    pub id: CameraId,
    pub name: String,
    pub accuracy: f64,
}

/// Disposition breakdown across the retained log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispositionCounts {
    pub real: usize,
    pub false_alarm: usize,
    pub pending: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneAlerts {
    pub zone: Zone,
    pub alerts: usize,
}

pub fn compute_stats(cameras: &[Camera], detections: &[Detection]) -> KernelStats {
    KernelStats {
        active_alerts: detections
            .iter()
            .filter(|d| d.is_alert && d.action == AlertAction::Pending)
            .count(),
        online_cameras: cameras.iter().filter(|c| c.online).count(),
        false_alerts: detections
            .iter()
            .filter(|d| d.action == AlertAction::False)
            .count(),
        total_detections: detections.len(),
        low_accuracy: cameras
            .iter()
            .filter(|c| c.accuracy < LOW_ACCURACY_THRESHOLD)
            .map(|c| CameraAccuracy {
                id: c.id.clone(),
                name: c.name.clone(),
                accuracy: c.accuracy,
            })
            .collect(),
    }
}

pub fn disposition_counts(detections: &[Detection]) -> DispositionCounts {
    let mut counts = DispositionCounts::default();
    for detection in detections {
        match detection.action {
            AlertAction::Real => counts.real += 1,
            AlertAction::False => counts.false_alarm += 1,
            AlertAction::Pending => counts.pending += 1,
        }
    }
    counts
}

/// Alert counts per zone, over the full zone list so charts keep a stable
/// axis even for quiet zones.
pub fn zone_alerts(detections: &[Detection]) -> Vec<ZoneAlerts> {
    Zone::ALL
        .iter()
        .map(|&zone| ZoneAlerts {
            zone,
            alerts: detections
                .iter()
                .filter(|d| d.zone == zone && d.is_alert)
                .count(),
        })
        .collect()
}

/// Per-camera accuracy series for the analytics view, in registry order.
pub fn accuracy_series(cameras: &[Camera]) -> Vec<CameraAccuracy> {
    cameras
        .iter()
        .map(|c| CameraAccuracy {
            id: c.id.clone(),
            name: c.name.clone(),
            accuracy: c.accuracy,
        })
        .collect()
}
