use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::warn;

use vigil_core_types::CoreError;

/// Default period between generation ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3_000;

/// Polling period used while the driver is paused (interval set to zero).
const PAUSED_POLL_MS: u64 = 250;

/// Receiver of scheduler ticks. The kernel implements this to run one
/// generate-classify-append cycle per tick.
#[async_trait]
pub trait TickSink: Send + Sync {
    async fn on_tick(&self) -> Result<(), CoreError>;
}

/// Cancellable periodic driver, the sole producer of time-based state
/// change.
///
/// The background task holds only a weak reference to the sink, so dropping
/// the owning session stops generation even without an explicit shutdown;
/// `shutdown` remains the deliberate way to stop it. Setting the interval
/// to zero pauses ticking without tearing the task down.
pub struct TickDriver {
    task: JoinHandle<()>,
    interval_ms: Arc<AtomicU64>,
}

impl TickDriver {
    pub fn spawn<S>(sink: &Arc<S>, interval_ms: Arc<AtomicU64>) -> Self
    where
        S: TickSink + 'static,
    {
        let weak = Arc::downgrade(sink);
        let interval = Arc::clone(&interval_ms);
        let task = tokio::spawn(async move {
            loop {
                let period = interval.load(Ordering::Relaxed);
                if period == 0 {
                    sleep(Duration::from_millis(PAUSED_POLL_MS)).await;
                    continue;
                }
                sleep(Duration::from_millis(period)).await;
                let Some(sink) = weak.upgrade() else {
                    break;
                };
                if let Err(err) = sink.on_tick().await {
                    warn!("tick sink failed: {err}");
                }
            }
        });
        Self { task, interval_ms }
    }

    pub fn set_interval_ms(&self, interval_ms: u64) {
        self.interval_ms.store(interval_ms, Ordering::Relaxed);
    }

    pub fn interval_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.interval_ms)
    }

    /// Stops the driver. Advisory and side-effect free: any tick already in
    /// flight completes, no further ticks fire.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingSink {
        ticks: AtomicUsize,
    }

    #[async_trait]
    impl TickSink for CountingSink {
        async fn on_tick(&self) -> Result<(), CoreError> {
            self.ticks.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    impl CountingSink {
        fn count(&self) -> usize {
            self.ticks.load(Ordering::Relaxed)
        }
    }

    #[tokio::test]
    async fn driver_delivers_periodic_ticks() {
        let sink = Arc::new(CountingSink::default());
        let driver = TickDriver::spawn(&sink, Arc::new(AtomicU64::new(10)));

        sleep(Duration::from_millis(120)).await;
        assert!(sink.count() >= 3);

        driver.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_stops_tick_delivery() {
        let sink = Arc::new(CountingSink::default());
        let driver = TickDriver::spawn(&sink, Arc::new(AtomicU64::new(10)));

        sleep(Duration::from_millis(60)).await;
        driver.shutdown().await;
        let after = sink.count();

        sleep(Duration::from_millis(60)).await;
        assert_eq!(sink.count(), after);
    }

    #[tokio::test]
    async fn zero_interval_pauses_ticking() {
        let sink = Arc::new(CountingSink::default());
        let driver = TickDriver::spawn(&sink, Arc::new(AtomicU64::new(0)));

        sleep(Duration::from_millis(80)).await;
        assert_eq!(sink.count(), 0);

        driver.set_interval_ms(10);
        sleep(Duration::from_millis(300)).await;
        assert!(sink.count() >= 1);

        driver.shutdown().await;
    }

    #[tokio::test]
    async fn dropping_the_sink_halts_the_loop() {
        let sink = Arc::new(CountingSink::default());
        let driver = TickDriver::spawn(&sink, Arc::new(AtomicU64::new(10)));

        drop(sink);
        sleep(Duration::from_millis(60)).await;

        // The loop exits on the failed upgrade; shutdown stays a no-op.
        driver.shutdown().await;
    }
}
