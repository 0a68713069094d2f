use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutrilens_core::domain::{common::entities::app_errors::CoreError, quota::QuotaStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use super::rate_limit::RateLimitHeaders;

pub const NO_FILE_UPLOADED: &str = "No file uploaded";
pub const ANALYSIS_FAILED: &str = "Failed to analyze image";

pub fn quota_exceeded_message(limit: u32) -> String {
    format!("Only {limit} requests are allowed per day. Please try again later")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    TooManyRequests { message: String, quota: QuotaStatus },

    #[error("{0}")]
    InternalServerError(String),
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingImage => ApiError::BadRequest(NO_FILE_UPLOADED.to_string()),
            CoreError::QuotaExceeded(quota) => ApiError::TooManyRequests {
                message: quota_exceeded_message(quota.limit),
                quota,
            },
            other => {
                error!(error = %other, "Food image analysis failed");
                ApiError::InternalServerError(ANALYSIS_FAILED.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
            ApiError::TooManyRequests { message, quota } => (
                StatusCode::TOO_MANY_REQUESTS,
                RateLimitHeaders::exceeded(quota),
                Json(ErrorBody { error: message }),
            )
                .into_response(),
            ApiError::InternalServerError(error) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
            }
        }
    }
}
