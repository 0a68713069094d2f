use thiserror::Error;

use crate::domain::quota::entities::QuotaStatus;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("No image payload was provided")]
    MissingImage,

    #[error("Request quota exhausted ({} allowed per window)", .0.limit)]
    QuotaExceeded(QuotaStatus),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid model output: {0}")]
    InvalidModelOutput(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid micronutrients: {0}")]
    InvalidMicronutrients(String),
}
