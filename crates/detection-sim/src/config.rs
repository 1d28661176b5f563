use serde::{Deserialize, Serialize};

use vigil_core_types::ObjectClass;

/// Label, alerting and noise configuration for the simulated classifier.
///
/// The alertable and ignorable sets are subsets of `labels`, kept as an
/// explicit table so alternative label fleets can be swapped in whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimPolicy {
    /// Object labels the generator draws from, uniformly.
    pub labels: Vec<ObjectClass>,
    /// Labels that can raise an alert.
    pub alertable: Vec<ObjectClass>,
    /// Labels treated as noise by `should_ignore`.
    pub ignorable: Vec<ObjectClass>,
    /// Confidence below which a detection counts as noise.
    pub noise_confidence_floor: u8,
    /// Minimum dwell time, in seconds, for alerting; shorter events are noise.
    pub min_alert_duration: f64,
    /// A masked camera suppresses an event only when the secondary uniform
    /// draw exceeds this threshold, so masking is probabilistic.
    pub mask_pass_threshold: f64,
    /// Upper bound of the simulated dwell time, uniform in [0, max_duration).
    pub max_duration: f64,
    /// Snapshot URLs attached to generated detections, drawn uniformly.
    pub snapshot_pool: Vec<String>,
}

impl SimPolicy {
    pub fn is_alertable(&self, object: ObjectClass) -> bool {
        self.alertable.contains(&object)
    }

    pub fn is_ignorable(&self, object: ObjectClass) -> bool {
        self.ignorable.contains(&object)
    }
}

impl Default for SimPolicy {
    fn default() -> Self {
        Self {
            labels: vec![
                ObjectClass::Person,
                ObjectClass::Vehicle,
                ObjectClass::Leaf,
                ObjectClass::Shadow,
                ObjectClass::Insect,
                ObjectClass::Light,
                ObjectClass::None,
            ],
            alertable: vec![ObjectClass::Person, ObjectClass::Vehicle],
            ignorable: vec![
                ObjectClass::Leaf,
                ObjectClass::Insect,
                ObjectClass::Light,
                ObjectClass::Shadow,
            ],
            noise_confidence_floor: 30,
            min_alert_duration: 1.0,
            mask_pass_threshold: 0.6,
            max_duration: 5.0,
            snapshot_pool: vec![
                "https://images.unsplash.com/photo-1557597774-9d273605dfa9?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1449844908441-8829872d2607?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1590856029826-c7a73142bbf1?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1590674899484-d5640e854abe?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1506521781263-d8422e82f27a?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1497366216548-37526070297c?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?w=400&h=300&fit=crop"
                    .to_string(),
                "https://images.unsplash.com/photo-1590674899474-d5640e854c2e?w=400&h=300&fit=crop"
                    .to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sets_are_subsets_of_the_label_list() {
        let policy = SimPolicy::default();
        for object in policy.alertable.iter().chain(policy.ignorable.iter()) {
            assert!(policy.labels.contains(object), "{object} missing from labels");
        }
    }

    #[test]
    fn alertable_and_ignorable_do_not_overlap() {
        let policy = SimPolicy::default();
        for object in &policy.alertable {
            assert!(!policy.is_ignorable(*object));
        }
    }
}
