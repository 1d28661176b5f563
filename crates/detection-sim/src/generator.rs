use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vigil_camera_registry::Camera;
use vigil_core_types::{AlertAction, DetectionId};
use vigil_detection_log::Detection;

use crate::classify;
use crate::config::SimPolicy;
use crate::errors::SimError;

/// Synthesizes detection events from the current camera fleet.
///
/// Production callers use `new` (entropy-seeded); tests inject a fixed seed
/// through `with_seed` to make generated sequences reproducible.
pub struct DetectionGenerator {
    policy: SimPolicy,
    rng: StdRng,
}

impl DetectionGenerator {
    pub fn new(policy: SimPolicy) -> Self {
        Self {
            policy,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(policy: SimPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self) -> &SimPolicy {
        &self.policy
    }

    /// Generates one classified detection against the given fleet snapshot.
    ///
    /// Picks a camera and an object label uniformly, samples confidence and
    /// dwell time, decides zone masking probabilistically for cameras with
    /// masked regions, and bakes the alert decision into the record.
    pub fn generate(&mut self, cameras: &[Camera]) -> Result<Detection, SimError> {
        if cameras.is_empty() {
            return Err(SimError::EmptyRegistry);
        }

        let camera = &cameras[self.rng.gen_range(0..cameras.len())];
        let object = self.policy.labels[self.rng.gen_range(0..self.policy.labels.len())];
        let confidence = self.rng.gen_range(0.0..100.0_f64).round() as u8;
        let duration = self.rng.gen_range(0.0..self.policy.max_duration);
        let zone_masked =
            camera.is_masked() && self.rng.gen::<f64>() > self.policy.mask_pass_threshold;

        let is_alert = classify::is_alert(
            &self.policy,
            object,
            confidence,
            camera.alert_threshold,
            duration,
            zone_masked,
        );

        let snapshot = if self.policy.snapshot_pool.is_empty() {
            String::new()
        } else {
            let pick = self.rng.gen_range(0..self.policy.snapshot_pool.len());
            self.policy.snapshot_pool[pick].clone()
        };

        Ok(Detection {
            id: DetectionId::new(),
            timestamp: Utc::now(),
            camera_id: camera.id.clone(),
            camera_name: camera.name.clone(),
            object,
            confidence,
            zone: camera.zone,
            is_alert,
            action: AlertAction::Pending,
            comment: None,
            snapshot,
            duration,
            zone_masked,
        })
    }
}
