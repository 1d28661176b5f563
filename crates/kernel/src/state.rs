use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;
use tracing::debug;

use vigil_camera_registry::{Camera, CameraRegistry, CameraRegistryImpl, NewCamera};
use vigil_core_types::{AlertAction, CameraId, CoreError, DetectionId};
use vigil_detection_log::{
    index_latest, Detection, DetectionFilter, DetectionLog, LatestIndexCache,
};
use vigil_detection_sim::{DetectionGenerator, SimPolicy};
use vigil_scheduler::{TickDriver, TickSink, DEFAULT_TICK_INTERVAL_MS};

use crate::errors::KernelError;
use crate::events::KernelEvent;
use crate::metrics;
use crate::stats::{self, CameraAccuracy, DispositionCounts, KernelStats, ZoneAlerts};

/// Cameras seeded into a fresh kernel by default.
pub const DEFAULT_CAMERA_COUNT: usize = 12;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The single state owner of the monitoring core.
///
/// Owns the camera registry, the bounded detection log, the generator and
/// the latest-per-camera cache; every mutation, whether a scheduler tick or
/// an operator action, goes through its methods in arrival order. Consumers
/// only ever read cloned snapshots.
pub struct VigilKernel {
    registry: Arc<CameraRegistryImpl>,
    log: DetectionLog,
    generator: Mutex<DetectionGenerator>,
    latest: LatestIndexCache,
    registry_version: AtomicU64,
    log_version: AtomicU64,
    events: broadcast::Sender<KernelEvent>,
    driver: Mutex<Option<TickDriver>>,
    tick_interval_ms: Arc<AtomicU64>,
}

impl VigilKernel {
    /// Kernel over a freshly seeded fleet, entropy-backed randomness.
    pub fn new(policy: SimPolicy, initial_cameras: usize) -> Arc<Self> {
        Self::build(
            CameraRegistryImpl::seed(initial_cameras),
            DetectionGenerator::new(policy),
        )
    }

    /// Fully reproducible kernel for tests: both the fleet seeding and the
    /// detection stream derive from `seed`.
    pub fn with_seed(policy: SimPolicy, initial_cameras: usize, seed: u64) -> Arc<Self> {
        let registry = CameraRegistryImpl::seed_with_rng(
            initial_cameras,
            &mut StdRng::seed_from_u64(seed),
        );
        Self::build(registry, DetectionGenerator::with_seed(policy, seed))
    }

    fn build(registry: CameraRegistryImpl, generator: DetectionGenerator) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            registry: Arc::new(registry),
            log: DetectionLog::new(),
            generator: Mutex::new(generator),
            latest: LatestIndexCache::new(),
            registry_version: AtomicU64::new(0),
            log_version: AtomicU64::new(0),
            events,
            driver: Mutex::new(None),
            tick_interval_ms: Arc::new(AtomicU64::new(DEFAULT_TICK_INTERVAL_MS)),
        })
    }

    /// Starts the periodic tick driver. Idempotent while running.
    pub fn start(self: &Arc<Self>) {
        let mut guard = self.driver.lock();
        if guard.is_some() {
            return;
        }
        *guard = Some(TickDriver::spawn(self, Arc::clone(&self.tick_interval_ms)));
    }

    /// Stops the tick driver; the owning session calls this on teardown so
    /// no tick can run against a torn-down registry.
    pub async fn shutdown(&self) {
        let driver = self.driver.lock().take();
        if let Some(driver) = driver {
            driver.shutdown().await;
        }
    }

    pub fn set_tick_interval_ms(&self, interval_ms: u64) {
        self.tick_interval_ms.store(interval_ms, Ordering::Relaxed);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KernelEvent> {
        self.events.subscribe()
    }

    pub async fn list_cameras(&self) -> Vec<Camera> {
        self.registry.list().await
    }

    pub async fn get_camera(&self, id: &CameraId) -> Option<Camera> {
        self.registry.get(id).await
    }

    pub fn list_detections(&self) -> Vec<Detection> {
        self.log.list()
    }

    pub fn query_detections(&self, filter: &DetectionFilter) -> Vec<Detection> {
        self.log.query(filter)
    }

    pub async fn add_camera(&self, data: NewCamera) -> Result<Camera, KernelError> {
        if data.name.trim().is_empty() {
            return Err(KernelError::InvalidCamera(
                "camera name must not be empty".to_string(),
            ));
        }
        let camera = self.registry.add(data).await;
        self.bump_registry();
        self.emit(KernelEvent::CameraAdded(camera.clone()));
        Ok(camera)
    }

    pub async fn update_camera(&self, camera: Camera) {
        let id = camera.id.clone();
        if self.registry.update(camera).await {
            self.bump_registry();
            self.emit(KernelEvent::CameraUpdated(id));
        }
    }

    pub async fn remove_camera(&self, id: &CameraId) {
        if self.registry.remove(id).await {
            self.bump_registry();
            self.emit(KernelEvent::CameraRemoved(id.clone()));
        }
    }

    pub async fn set_masked_zones(&self, id: &CameraId, zones: Vec<String>) {
        if self.registry.set_masked_zones(id, zones.clone()).await {
            self.bump_registry();
            self.emit(KernelEvent::MaskedZonesSet {
                id: id.clone(),
                zones,
            });
        }
    }

    /// Applies an operator disposition to a logged detection. Unknown ids,
    /// including detections already evicted from the log, are silently
    /// ignored.
    pub fn mark_detection_action(
        &self,
        id: &DetectionId,
        action: AlertAction,
        comment: Option<String>,
    ) {
        if self.log.mark_action(id, action, comment) {
            self.log_version.fetch_add(1, Ordering::Relaxed);
            metrics::record_action_marked();
            self.emit(KernelEvent::DetectionMarked {
                id: id.clone(),
                action,
            });
        }
    }

    /// Latest detection per registered camera, memoized on the
    /// (registry, log) version pair so repeated reads between updates skip
    /// the rescan.
    pub async fn latest_by_camera(&self) -> Arc<HashMap<CameraId, Detection>> {
        let registry_version = self.registry_version.load(Ordering::Relaxed);
        let log_version = self.log_version.load(Ordering::Relaxed);
        let ids: Vec<CameraId> = self
            .registry
            .list()
            .await
            .into_iter()
            .map(|camera| camera.id)
            .collect();
        self.latest
            .get_or_compute(registry_version, log_version, || {
                index_latest(&ids, &self.log.list())
            })
    }

    pub async fn stats(&self) -> KernelStats {
        stats::compute_stats(&self.registry.list().await, &self.log.list())
    }

    pub fn disposition_counts(&self) -> DispositionCounts {
        stats::disposition_counts(&self.log.list())
    }

    pub fn zone_alert_counts(&self) -> Vec<ZoneAlerts> {
        stats::zone_alerts(&self.log.list())
    }

    pub async fn camera_accuracy_series(&self) -> Vec<CameraAccuracy> {
        stats::accuracy_series(&self.registry.list().await)
    }

    fn bump_registry(&self) {
        self.registry_version.fetch_add(1, Ordering::Relaxed);
    }

    fn emit(&self, event: KernelEvent) {
        if self.events.send(event).is_err() {
            debug!("kernel event dropped: no subscribers");
        }
    }
}

#[async_trait]
impl TickSink for VigilKernel {
    /// One generation cycle: snapshot the fleet, synthesize and classify a
    /// detection, append it and notify subscribers. Fails loudly when the
    /// registry is empty.
    async fn on_tick(&self) -> Result<(), CoreError> {
        let cameras = self.registry.list().await;
        let detection = self.generator.lock().generate(&cameras)?;
        metrics::record_detection(detection.is_alert);
        self.log.append(detection.clone());
        self.log_version.fetch_add(1, Ordering::Relaxed);
        self.emit(KernelEvent::DetectionProduced(detection));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};
    use vigil_core_types::Zone;

    fn kernel(cameras: usize, seed: u64) -> Arc<VigilKernel> {
        VigilKernel::with_seed(SimPolicy::default(), cameras, seed)
    }

    #[tokio::test]
    async fn tick_appends_and_notifies() {
        let kernel = kernel(3, 17);
        let mut rx = kernel.subscribe();

        kernel.on_tick().await.unwrap();

        assert_eq!(kernel.list_detections().len(), 1);
        match rx.recv().await.unwrap() {
            KernelEvent::DetectionProduced(detection) => {
                assert_eq!(detection, kernel.list_detections()[0]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn tick_against_empty_registry_fails_loudly() {
        let kernel = kernel(1, 3);
        kernel.remove_camera(&CameraId::from_index(1)).await;

        assert!(kernel.on_tick().await.is_err());
        assert!(kernel.list_detections().is_empty());
    }

    #[tokio::test]
    async fn alert_review_flow_end_to_end() {
        // Single unmasked camera at the default threshold; drive ticks until
        // the generator produces an alert, then disposition it.
        let kernel = kernel(1, 1);
        let mut camera = kernel.get_camera(&CameraId::from_index(1)).await.unwrap();
        camera.masked_zones.clear();
        camera.alert_threshold = 80;
        kernel.update_camera(camera).await;

        let mut found = None;
        for _ in 0..2_000 {
            kernel.on_tick().await.unwrap();
            found = kernel.list_detections().into_iter().find(|d| d.is_alert);
            if found.is_some() {
                break;
            }
        }
        let alert = found.expect("seeded generator never produced an alert");
        assert_eq!(alert.action, AlertAction::Pending);

        kernel.mark_detection_action(
            &alert.id,
            AlertAction::False,
            Some("branch shadow".to_string()),
        );

        let stored = kernel
            .list_detections()
            .into_iter()
            .find(|d| d.id == alert.id)
            .unwrap();
        assert_eq!(stored.action, AlertAction::False);
        assert_eq!(stored.comment.as_deref(), Some("branch shadow"));
        assert!(stored.is_alert);
    }

    #[tokio::test]
    async fn marking_an_unknown_detection_changes_nothing() {
        let kernel = kernel(2, 5);
        kernel.on_tick().await.unwrap();
        let before = kernel.list_detections();

        kernel.mark_detection_action(&DetectionId::new(), AlertAction::Real, None);

        assert_eq!(kernel.list_detections(), before);
    }

    #[tokio::test]
    async fn deleting_a_camera_keeps_its_log_entries() {
        let kernel = kernel(1, 9);
        kernel.on_tick().await.unwrap();
        kernel.on_tick().await.unwrap();
        let before = kernel.list_detections();
        assert_eq!(before.len(), 2);

        let id = CameraId::from_index(1);
        kernel.remove_camera(&id).await;

        assert_eq!(kernel.list_detections(), before);
        assert!(kernel.list_cameras().await.is_empty());
        assert!(kernel.latest_by_camera().await.get(&id).is_none());
        let by_camera = kernel.query_detections(&DetectionFilter {
            camera: Some(id),
            ..Default::default()
        });
        assert_eq!(by_camera.len(), 2);
    }

    #[tokio::test]
    async fn latest_index_tracks_the_newest_detection() {
        let kernel = kernel(1, 21);
        for _ in 0..3 {
            kernel.on_tick().await.unwrap();
        }

        let index = kernel.latest_by_camera().await;
        let newest = &kernel.list_detections()[0];
        assert_eq!(index.get(&newest.camera_id).unwrap().id, newest.id);
    }

    #[tokio::test]
    async fn add_camera_rejects_blank_names() {
        let kernel = kernel(1, 2);

        let result = kernel
            .add_camera(NewCamera {
                name: "   ".to_string(),
                zone: Zone::Office,
                alert_threshold: 70,
                masked_zones: Vec::new(),
            })
            .await;

        assert!(matches!(result, Err(KernelError::InvalidCamera(_))));
        assert_eq!(kernel.list_cameras().await.len(), 1);
    }

    #[tokio::test]
    async fn camera_mutations_emit_events() {
        let kernel = kernel(1, 4);
        let mut rx = kernel.subscribe();

        let added = kernel
            .add_camera(NewCamera {
                name: "Rear fence".to_string(),
                zone: Zone::Yard,
                alert_threshold: 75,
                masked_zones: vec!["hedge".to_string()],
            })
            .await
            .unwrap();
        kernel
            .set_masked_zones(&added.id, vec!["hedge".to_string(), "path".to_string()])
            .await;
        kernel.remove_camera(&added.id).await;

        assert!(matches!(rx.recv().await.unwrap(), KernelEvent::CameraAdded(_)));
        assert!(matches!(
            rx.recv().await.unwrap(),
            KernelEvent::MaskedZonesSet { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            KernelEvent::CameraRemoved(_)
        ));
    }

    #[tokio::test]
    async fn driver_lifecycle_produces_and_stops() {
        let kernel = kernel(4, 33);
        kernel.set_tick_interval_ms(10);

        kernel.start();
        sleep(Duration::from_millis(150)).await;
        assert!(!kernel.list_detections().is_empty());

        kernel.shutdown().await;
        let settled = kernel.list_detections().len();
        sleep(Duration::from_millis(80)).await;
        assert_eq!(kernel.list_detections().len(), settled);
    }
}
