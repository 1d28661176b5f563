use thiserror::Error;

use vigil_core_types::CoreError;

#[derive(Debug, Error)]
pub enum KernelError {
    /// Camera creation input rejected at the boundary; the registry itself
    /// accepts any well-typed record.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),
}

impl From<KernelError> for CoreError {
    fn from(value: KernelError) -> Self {
        CoreError::new(value.to_string())
    }
}
