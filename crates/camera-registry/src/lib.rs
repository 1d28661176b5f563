pub mod api;
pub mod metrics;
pub mod model;
pub mod state;

pub use api::CameraRegistry;
pub use model::{Camera, NewCamera, DEFAULT_ALERT_THRESHOLD};
pub use state::CameraRegistryImpl;
