pub mod latest;
pub mod log;
pub mod model;

pub use latest::{index_latest, LatestIndexCache};
pub use log::{DetectionLog, DEFAULT_LOG_CAPACITY};
pub use model::{Detection, DetectionFilter};
