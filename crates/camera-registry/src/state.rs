use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use vigil_core_types::{CameraId, Zone};

use crate::api::CameraRegistry;
use crate::metrics;
use crate::model::{
    Camera, NewCamera, ACCURACY_MAX, ACCURACY_MIN, DEFAULT_ALERT_THRESHOLD,
    SEED_MASKED_PROBABILITY, SEED_MASKED_ZONES, SEED_ONLINE_PROBABILITY,
};

/// In-memory camera registry shared by the kernel and its consumers.
pub struct CameraRegistryImpl {
    cameras: DashMap<CameraId, Arc<RwLock<Camera>>>,
}

impl CameraRegistryImpl {
    pub fn new() -> Self {
        Self {
            cameras: DashMap::new(),
        }
    }

    /// Seeds a randomized fleet of `count` cameras: zero-padded ids, zones
    /// cycling through the zone list, default threshold, mostly online.
    pub fn seed(count: usize) -> Self {
        Self::seed_with_rng(count, &mut StdRng::from_entropy())
    }

    pub fn seed_with_rng<R: Rng>(count: usize, rng: &mut R) -> Self {
        let registry = Self::new();
        for index in 1..=count {
            let id = CameraId::from_index(index);
            let camera = Camera {
                id: id.clone(),
                name: id.0.clone(),
                zone: Zone::ALL[(index - 1) % Zone::ALL.len()],
                alert_threshold: DEFAULT_ALERT_THRESHOLD,
                online: rng.gen_bool(SEED_ONLINE_PROBABILITY),
                accuracy: rng.gen_range(ACCURACY_MIN..ACCURACY_MAX),
                masked_zones: if rng.gen_bool(SEED_MASKED_PROBABILITY) {
                    SEED_MASKED_ZONES.iter().map(|zone| zone.to_string()).collect()
                } else {
                    Vec::new()
                },
            };
            registry
                .cameras
                .insert(id, Arc::new(RwLock::new(camera)));
        }
        registry.publish_counts();
        registry
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Next unused zero-padded id, starting from the monotonic suffix
    /// derived from the current size. Skips suffixes still held by live
    /// records so removals can never lead to a duplicate id.
    fn next_free_id(&self) -> CameraId {
        let mut index = self.cameras.len() + 1;
        loop {
            let id = CameraId::from_index(index);
            if !self.cameras.contains_key(&id) {
                return id;
            }
            index += 1;
        }
    }

    fn publish_counts(&self) {
        let online = self
            .cameras
            .iter()
            .filter(|entry| entry.value().read().online)
            .count();
        metrics::set_camera_counts(self.cameras.len(), online);
    }
}

impl Default for CameraRegistryImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CameraRegistry for CameraRegistryImpl {
    async fn add(&self, data: NewCamera) -> Camera {
        let id = self.next_free_id();
        let camera = Camera {
            id: id.clone(),
            name: data.name,
            zone: data.zone,
            alert_threshold: data.alert_threshold,
            online: true,
            accuracy: rand::thread_rng().gen_range(ACCURACY_MIN..ACCURACY_MAX),
            masked_zones: data.masked_zones,
        };
        self.cameras
            .insert(id, Arc::new(RwLock::new(camera.clone())));
        self.publish_counts();
        camera
    }

    async fn update(&self, camera: Camera) -> bool {
        let found = match self.cameras.get(&camera.id) {
            Some(entry) => {
                *entry.value().write() = camera;
                true
            }
            None => {
                debug!(id = %camera.id, "update for unknown camera ignored");
                false
            }
        };
        if found {
            self.publish_counts();
        }
        found
    }

    async fn remove(&self, id: &CameraId) -> bool {
        let removed = self.cameras.remove(id).is_some();
        if removed {
            self.publish_counts();
        } else {
            debug!(%id, "remove for unknown camera ignored");
        }
        removed
    }

    async fn set_masked_zones(&self, id: &CameraId, zones: Vec<String>) -> bool {
        match self.cameras.get(id) {
            Some(entry) => {
                entry.value().write().masked_zones = zones;
                true
            }
            None => {
                debug!(%id, "masked-zone update for unknown camera ignored");
                false
            }
        }
    }

    async fn get(&self, id: &CameraId) -> Option<Camera> {
        self.cameras
            .get(id)
            .map(|entry| entry.value().read().clone())
    }

    async fn list(&self) -> Vec<Camera> {
        let mut cameras: Vec<Camera> = self
            .cameras
            .iter()
            .map(|entry| entry.value().read().clone())
            .collect();
        cameras.sort_by(|a, b| a.id.cmp(&b.id));
        cameras
    }
}
