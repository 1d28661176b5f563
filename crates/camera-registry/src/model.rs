use vigil_core_types::{CameraId, Zone};

/// Default alert confidence threshold assigned to seeded cameras.
pub const DEFAULT_ALERT_THRESHOLD: u8 = 80;

/// Probability that a seeded camera starts online.
pub const SEED_ONLINE_PROBABILITY: f64 = 0.95;

/// Probability that a seeded camera starts with the fixed masked-zone pair.
pub const SEED_MASKED_PROBABILITY: f64 = 0.3;

/// Masked-zone pair applied to a fraction of seeded cameras.
pub const SEED_MASKED_ZONES: [&str; 2] = ["tree", "sky"];

/// Accuracy sampling bounds, uniform in [60, 100).
pub const ACCURACY_MIN: f64 = 60.0;
pub const ACCURACY_MAX: f64 = 100.0;

/// A registered camera. `online` and `accuracy` are assigned at creation
/// and only change through explicit edits, never by the detection pipeline.
#[derive(Clone, Debug)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    pub zone: Zone,
    pub alert_threshold: u8,
    pub online: bool,
    pub accuracy: f64,
    pub masked_zones: Vec<String>,
}

impl Camera {
    pub fn is_masked(&self) -> bool {
        !self.masked_zones.is_empty()
    }
}

/// Caller-supplied fields for camera creation. The registry assigns the id,
/// forces the camera online and samples a fresh accuracy.
#[derive(Clone, Debug)]
pub struct NewCamera {
    pub name: String,
    pub zone: Zone,
    pub alert_threshold: u8,
    pub masked_zones: Vec<String>,
}
