pub mod errors;
pub mod events;
pub mod feed;
pub mod metrics;
pub mod state;
pub mod stats;

pub use errors::KernelError;
pub use events::KernelEvent;
pub use feed::feed_url;
pub use state::{VigilKernel, DEFAULT_CAMERA_COUNT};
pub use stats::{CameraAccuracy, DispositionCounts, KernelStats, ZoneAlerts, LOW_ACCURACY_THRESHOLD};
