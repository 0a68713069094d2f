#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use nutrilens_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const ANALYSE_PATH: &str = "/api/analyse-food";

pub struct TestApp {
    pub server: TestServer,
    pub provider: MockServer,
    pub upload_dir: PathBuf,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn spawn(extra_args: &[&str]) -> Self {
        let provider = MockServer::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let upload_dir = tmp.path().join("uploads");

        let provider_uri = provider.uri();
        let upload_dir_arg = upload_dir.to_string_lossy().to_string();
        let mut argv = vec![
            "nutrilens-api",
            "--openai-api-key",
            "sk-test",
            "--openai-base-url",
            provider_uri.as_str(),
            "--upload-dir",
            upload_dir_arg.as_str(),
            "--trust-proxy",
        ];
        argv.extend_from_slice(extra_args);

        let args = Arc::new(Args::try_parse_from(argv).unwrap());
        let app_state = state(args).await.unwrap();
        let server = TestServer::new(router(app_state).unwrap()).unwrap();

        Self {
            server,
            provider,
            upload_dir,
            _tmp: tmp,
        }
    }

    /// Fake model provider answering every upload and generation.
    pub async fn model_answers(&self, analysis: &Value, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "file-abc123",
                "object": "file",
                "purpose": "vision"
            })))
            .expect(expected_calls)
            .mount(&self.provider)
            .await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "resp_1",
                "output": [{
                    "type": "message",
                    "role": "assistant",
                    "content": [{ "type": "output_text", "text": analysis.to_string() }]
                }]
            })))
            .expect(expected_calls)
            .mount(&self.provider)
            .await;
    }

    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir).unwrap().count()
    }
}

pub fn photo_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(b"fake-png-bytes".to_vec())
            .file_name("temp.png")
            .mime_type("image/png"),
    )
}

fn detail(category: &str, amount: &str) -> Value {
    json!({ "category": category, "amount": amount, "note": "Supports everyday health" })
}

pub fn analysis_json() -> Value {
    json!({
        "error": null,
        "identifiedFoodItems": ["grilled chicken", "brown rice", "broccoli"],
        "estimatedPortionSize": [
            { "itemName": "grilled chicken", "itemSize": "150 g" },
            { "itemName": "brown rice", "itemSize": "180 g" },
            { "itemName": "broccoli", "itemSize": "90 g" }
        ],
        "macros": { "calories": 620, "protein": 30, "carbs": 40, "fats": 20, "fiber": 7.5 },
        "micronutrients": {
            "Vitamin A": detail("High", "900 mcg"),
            "Vitamin B": detail("Moderate", "1.1 mg"),
            "Vitamin C": detail("High", "80 mg"),
            "Vitamin D": detail("Low", "1 mcg"),
            "Vitamin E": detail("Moderate", "3 mg"),
            "Vitamin K": detail("High", "100 mcg"),
            "Calcium": detail("Low", "80 mg"),
            "Iron": detail("Moderate", "3 mg"),
            "Magnesium": detail("Moderate", "90 mg"),
            "Sodium": detail("Low", "300 mg"),
            "Potassium": detail("High", "900 mg"),
            "Zinc": detail("Low", "2 mg")
        },
        "health_notes": ["💪 Great protein for recovery", "🥦 Fiber keeps you full"],
        "healthier_suggestions": ["🥗 Add a side salad", "💧 Drink a glass of water"]
    })
}
