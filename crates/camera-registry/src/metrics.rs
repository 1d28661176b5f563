use lazy_static::lazy_static;
use prometheus::{core::Collector, IntGauge, Registry};
use tracing::error;

lazy_static! {
    static ref REGISTRY_CAMERAS_TOTAL: IntGauge =
        IntGauge::new("vigil_registry_cameras_total", "Total registered cameras").unwrap();
    static ref REGISTRY_CAMERAS_ONLINE: IntGauge =
        IntGauge::new("vigil_registry_cameras_online", "Registered cameras marked online").unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register camera registry metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, REGISTRY_CAMERAS_TOTAL.clone());
    register(registry, REGISTRY_CAMERAS_ONLINE.clone());
}

pub fn set_camera_counts(total: usize, online: usize) {
    REGISTRY_CAMERAS_TOTAL.set(total as i64);
    REGISTRY_CAMERAS_ONLINE.set(online as i64);
}
