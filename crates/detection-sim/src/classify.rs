use vigil_core_types::ObjectClass;
use vigil_detection_log::Detection;

use crate::config::SimPolicy;

/// Alerting decision rule, applied once at generation time.
///
/// True iff the object is alertable, confidence clears the camera's
/// threshold, the dwell time clears the minimum, and the event did not fall
/// in a masked region.
pub fn is_alert(
    policy: &SimPolicy,
    object: ObjectClass,
    confidence: u8,
    alert_threshold: u8,
    duration: f64,
    zone_masked: bool,
) -> bool {
    policy.is_alertable(object)
        && confidence >= alert_threshold
        && duration >= policy.min_alert_duration
        && !zone_masked
}

/// Noise filter for log and analytics views, independent of `is_alert`.
///
/// True iff the object label is ignorable, the confidence sits below the
/// noise floor, the dwell time is too short, or the event was zone-masked.
pub fn should_ignore(policy: &SimPolicy, detection: &Detection) -> bool {
    policy.is_ignorable(detection.object)
        || detection.confidence < policy.noise_confidence_floor
        || detection.duration < policy.min_alert_duration
        || detection.zone_masked
}
