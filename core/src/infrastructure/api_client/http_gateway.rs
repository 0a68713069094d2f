use reqwest::{
    Client, StatusCode,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::domain::{
    capture::ports::{AnalysisGateway, GatewayError},
    food_analysis::{
        entities::{AnalysisResult, parse_analysis_result},
        value_objects::ImageFile,
    },
};

pub const ANALYSE_FOOD_PATH: &str = "api/analyse-food";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to a running NutriLens API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAnalysisGateway {
    endpoint: String,
    client: Client,
}

impl HttpAnalysisGateway {
    pub fn new(base_url: &Url) -> Self {
        Self {
            endpoint: format!(
                "{}/{}",
                base_url.as_str().trim_end_matches('/'),
                ANALYSE_FOOD_PATH
            ),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalysisGateway for HttpAnalysisGateway {
    #[instrument(skip(self, photo), fields(file_name = %photo.file_name, size = photo.len()))]
    async fn analyse(&self, photo: ImageFile) -> Result<AnalysisResult, GatewayError> {
        let part = Part::bytes(photo.data.to_vec())
            .file_name(photo.file_name)
            .mime_str(&photo.mime_type)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Analysis request failed: {}", e);
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if status.is_success() {
            return parse_analysis_result(&body)
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()));
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .map_err(|_| GatewayError::InvalidResponse(format!("{status}: {body}")))?;

        Err(match status {
            StatusCode::BAD_REQUEST => GatewayError::Rejected(message),
            StatusCode::TOO_MANY_REQUESTS => GatewayError::QuotaExceeded(message),
            s if s.is_server_error() => GatewayError::ServerFailure(message),
            _ => GatewayError::InvalidResponse(format!("{status}: {message}")),
        })
    }
}
