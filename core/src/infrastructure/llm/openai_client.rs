use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        ports::LLMClient,
        schema::ANALYSIS_SCHEMA_NAME,
        value_objects::{FileReference, ImageFile},
    },
};

const UPLOAD_PURPOSE: &str = "vision";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct FileObject {
    id: String,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
    text: TextConfig,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: Vec<InputContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent {
    InputText { text: String },
    InputImage { file_id: String, detail: &'static str },
}

#[derive(Debug, Serialize)]
struct TextConfig {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    schema: serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputContent {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

impl ResponsesResponse {
    /// Concatenates every `output_text` part. A refusal anywhere wins.
    fn into_text(self) -> Result<String, CoreError> {
        let mut text = String::new();

        for item in self.output {
            let OutputItem::Message { content } = item else {
                continue;
            };
            for part in content {
                match part {
                    OutputContent::OutputText { text: chunk } => text.push_str(&chunk),
                    OutputContent::Refusal { refusal } => {
                        return Err(CoreError::ExternalServiceError(format!(
                            "LLM refused the request: {refusal}"
                        )));
                    }
                    OutputContent::Other => {}
                }
            }
        }

        if text.trim().is_empty() {
            return Err(CoreError::ExternalServiceError(
                "No response from LLM".to_string(),
            ));
        }

        Ok(text)
    }
}

impl OpenAiClient {
    pub fn new(api_key: String, model_name: String, base_url: &str) -> Result<Self, CoreError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            CoreError::ExternalServiceError(format!("Invalid LLM base URL {base_url}: {e}"))
        })?;

        Ok(Self {
            api_key,
            model_name,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send<T>(&self, request: reqwest::RequestBuilder) -> Result<T, CoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = request.bearer_auth(&self.api_key).send().await.map_err(|e| {
            tracing::error!("OpenAI API request failed: {}", e);
            CoreError::ExternalServiceError(format!("LLM API error: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })
    }
}

impl LLMClient for OpenAiClient {
    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.len()))]
    async fn upload_image(&self, image: ImageFile) -> Result<FileReference, CoreError> {
        let part = Part::bytes(image.data.to_vec())
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(|e| {
                CoreError::ExternalServiceError(format!("Invalid image content type: {}", e))
            })?;

        let form = Form::new()
            .text("purpose", UPLOAD_PURPOSE)
            .part("file", part);

        let file: FileObject = self
            .send(self.client.post(self.endpoint("files")).multipart(form))
            .await?;

        tracing::debug!(file_id = %file.id, "Image uploaded to OpenAI");

        Ok(FileReference { id: file.id })
    }

    #[instrument(skip(self, prompt, response_schema), fields(model = %self.model_name, file_id = %file.id))]
    async fn generate_with_file(
        &self,
        prompt: String,
        file: FileReference,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let request = ResponsesRequest {
            model: self.model_name.clone(),
            input: vec![InputMessage {
                role: "user",
                content: vec![
                    InputContent::InputText { text: prompt },
                    InputContent::InputImage {
                        file_id: file.id,
                        detail: "auto",
                    },
                ],
            }],
            text: TextConfig {
                format: TextFormat {
                    kind: "json_schema",
                    name: ANALYSIS_SCHEMA_NAME,
                    schema: response_schema,
                    strict: true,
                },
            },
        };

        let response: ResponsesResponse = self
            .send(self.client.post(self.endpoint("responses")).json(&request))
            .await?;

        response.into_text()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, body_string_contains, header, method, path},
    };

    use super::*;
    use crate::domain::food_analysis::{prompt::ANALYSIS_PROMPT, schema::analysis_result_schema};

    fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            "test-key".to_string(),
            "gpt-5-nano".to_string(),
            &server.uri(),
        )
        .unwrap()
    }

    fn image() -> ImageFile {
        ImageFile::new(
            Some("temp.png".to_string()),
            Some("image/png".to_string()),
            Bytes::from_static(b"fake-png-bytes"),
        )
    }

    fn file() -> FileReference {
        FileReference {
            id: "file-abc123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_image_posts_vision_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_string_contains("vision"))
            .and(body_string_contains("temp.png"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "file-abc123",
                "object": "file",
                "purpose": "vision"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reference = client(&server).upload_image(image()).await.unwrap();

        assert_eq!(reference, file());
    }

    #[tokio::test]
    async fn test_generate_sends_file_and_strict_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(body_partial_json(json!({
                "model": "gpt-5-nano",
                "text": { "format": {
                    "type": "json_schema",
                    "name": "nutritionResponse",
                    "strict": true
                }}
            })))
            .and(body_string_contains(r#""file_id":"file-abc123""#))
            .and(body_string_contains(r#""detail":"auto""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "resp_1",
                "output": [
                    { "type": "reasoning", "summary": [] },
                    { "type": "message", "role": "assistant", "content": [
                        { "type": "output_text", "text": "{\"error\":", "annotations": [] },
                        { "type": "output_text", "text": "null}", "annotations": [] }
                    ]}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .generate_with_file(ANALYSIS_PROMPT.to_string(), file(), analysis_result_schema())
            .await
            .unwrap();

        assert_eq!(text, r#"{"error":null}"#);
    }

    #[tokio::test]
    async fn test_refusal_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "output": [{ "type": "message", "content": [
                    { "type": "refusal", "refusal": "I can't help with that." }
                ]}]
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_with_file("prompt".to_string(), file(), json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(msg) if msg.contains("refused")));
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": [] })))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_with_file("prompt".to_string(), file(), json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client(&server).upload_image(image()).await.unwrap_err();

        match err {
            CoreError::ExternalServiceError(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = OpenAiClient::new("k".to_string(), "m".to_string(), "not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_path_is_kept() {
        let client = OpenAiClient::new(
            "k".to_string(),
            "m".to_string(),
            "https://api.openai.com/v1/",
        )
        .unwrap();
        assert_eq!(client.endpoint("files"), "https://api.openai.com/v1/files");
    }
}
