use std::future::Future;

use thiserror::Error;

use crate::domain::food_analysis::{entities::AnalysisResult, value_objects::ImageFile};

/// Failures seen by a client of the analysis API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("{0}")]
    ServerFailure(String),

    #[error("Could not reach the analysis service: {0}")]
    Transport(String),

    #[error("Unexpected response from the analysis service: {0}")]
    InvalidResponse(String),
}

/// Client side of the analysis HTTP boundary
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisGateway: Send + Sync {
    fn analyse(
        &self,
        photo: ImageFile,
    ) -> impl Future<Output = Result<AnalysisResult, GatewayError>> + Send;
}
