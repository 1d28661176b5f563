use lazy_static::lazy_static;
use prometheus::{core::Collector, IntCounter, Registry};
use tracing::error;

lazy_static! {
    static ref KERNEL_DETECTIONS_TOTAL: IntCounter =
        IntCounter::new("vigil_kernel_detections_total", "Detections generated").unwrap();
    static ref KERNEL_ALERTS_TOTAL: IntCounter =
        IntCounter::new("vigil_kernel_alerts_total", "Detections classified as alerts").unwrap();
    static ref KERNEL_ACTIONS_MARKED_TOTAL: IntCounter = IntCounter::new(
        "vigil_kernel_actions_marked_total",
        "Operator dispositions applied to detections",
    )
    .unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register kernel metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, KERNEL_DETECTIONS_TOTAL.clone());
    register(registry, KERNEL_ALERTS_TOTAL.clone());
    register(registry, KERNEL_ACTIONS_MARKED_TOTAL.clone());
}

pub fn record_detection(is_alert: bool) {
    KERNEL_DETECTIONS_TOTAL.inc();
    if is_alert {
        KERNEL_ALERTS_TOTAL.inc();
    }
}

pub fn record_action_marked() {
    KERNEL_ACTIONS_MARKED_TOTAL.inc();
}
