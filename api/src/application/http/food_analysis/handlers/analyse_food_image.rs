use axum::{
    Extension,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};
use bytes::Bytes;
use nutrilens_core::domain::food_analysis::{
    entities::AnalysisResult,
    ports::FoodAnalysisService,
    value_objects::{AnalyseFoodInput, ImageFile},
};
use tracing::debug;

use crate::application::{
    caller_middleware::CallerContext,
    http::server::{
        api_entities::{
            api_error::{ApiError, NO_FILE_UPLOADED},
            rate_limit::RateLimitHeaders,
            response::Response,
        },
        app_state::AppState,
    },
};

const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/analyse-food",
    tag = "food-analysis",
    summary = "Analyse a meal photo",
    description = "Uploads one food image and returns its nutritional breakdown. Limited per caller over a fixed daily window.",
    request_body(
        content = crate::application::http::food_analysis::validators::AnalyseFoodForm,
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, body = AnalysisResult),
        (status = 400, body = crate::application::http::server::api_entities::api_error::ErrorBody),
        (status = 429, body = crate::application::http::server::api_entities::api_error::ErrorBody),
        (status = 500, body = crate::application::http::server::api_entities::api_error::ErrorBody)
    ),
)]
pub async fn analyse_food_image(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(RateLimitHeaders, Response<AnalysisResult>), ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected non-multipart upload: {}", e);
        ApiError::BadRequest(NO_FILE_UPLOADED.to_string())
    })?;

    let image = read_image(&mut multipart, state.args.server.max_upload_bytes)
        .await?
        .ok_or_else(|| ApiError::BadRequest(NO_FILE_UPLOADED.to_string()))?;

    let report = state
        .service
        .analyse_food(AnalyseFoodInput {
            caller: caller.key,
            image,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        RateLimitHeaders::allowed(report.quota),
        Response::OK(report.result),
    ))
}

/// Returns the first non-empty `file` field, if any.
async fn read_image(
    multipart: &mut Multipart,
    max_upload_bytes: usize,
) -> Result<Option<ImageFile>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text(), max_upload_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let mime_type = field.content_type().map(str::to_string);
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text(), max_upload_bytes))?;

        if data.is_empty() {
            continue;
        }

        return Ok(Some(ImageFile::new(file_name, mime_type, data)));
    }

    Ok(None)
}

fn multipart_error(status: StatusCode, detail: String, max_upload_bytes: usize) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(format!(
            "Image too large. Max size is {} bytes",
            max_upload_bytes
        ))
    } else {
        debug!("Failed to read multipart body: {}", detail);
        ApiError::BadRequest(NO_FILE_UPLOADED.to_string())
    }
}
