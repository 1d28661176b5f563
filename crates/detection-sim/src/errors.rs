use thiserror::Error;

use vigil_core_types::CoreError;

#[derive(Debug, Error)]
pub enum SimError {
    /// Generation was invoked against an empty camera registry. This is a
    /// caller-ordering bug, never silently papered over with an invalid
    /// record.
    #[error("cannot generate a detection: camera registry is empty")]
    EmptyRegistry,
}

impl From<SimError> for CoreError {
    fn from(value: SimError) -> Self {
        CoreError::new(value.to_string())
    }
}
