use tracing::{info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        entities::{AnalysisResult, parse_analysis_result},
        ports::{FoodAnalysisService, LLMClient},
        prompt::{ANALYSIS_PROMPT, ANALYSIS_PROMPT_VERSION},
        schema::analysis_result_schema,
        value_objects::{AnalyseFoodInput, AnalysisReport},
    },
    quota::{entities::QuotaDecision, ports::QuotaRepository},
    storage::{entities::StagedImage, ports::ImageStagingPort},
};

impl<LLM, Q, S> FoodAnalysisService for Service<LLM, Q, S>
where
    LLM: LLMClient,
    Q: QuotaRepository,
    S: ImageStagingPort,
{
    #[instrument(
        skip(self, input),
        fields(caller = %input.caller, file_name = %input.image.file_name, size = input.image.len())
    )]
    async fn analyse_food(&self, input: AnalyseFoodInput) -> Result<AnalysisReport, CoreError> {
        // 1. Payload presence
        if input.image.is_empty() {
            return Err(CoreError::MissingImage);
        }

        // 2. Quota, before anything external happens
        let quota = match self.quota_repository.record_attempt(input.caller).await? {
            QuotaDecision::Allowed(status) => status,
            QuotaDecision::Exceeded(status) => {
                warn!(limit = status.limit, reset_at = %status.reset_at, "Analysis quota exhausted");
                return Err(CoreError::QuotaExceeded(status));
            }
        };

        // 3. Stage, analyse, then discard. The handle removes the file itself if
        // this future is dropped before discard runs.
        let staged = self.image_staging.stage(input.image).await?;
        let outcome = self.analyse_staged(&staged).await;

        if let Err(e) = self.image_staging.discard(staged).await {
            warn!(error = %e, "Failed to remove staged upload");
        }

        let result = outcome?;

        info!(
            domain_error = result.domain_error().is_some(),
            items = result.identified_food_items.len(),
            remaining = quota.remaining,
            "Food image analysed"
        );

        Ok(AnalysisReport { result, quota })
    }
}

impl<LLM, Q, S> Service<LLM, Q, S>
where
    LLM: LLMClient,
    Q: QuotaRepository,
    S: ImageStagingPort,
{
    async fn analyse_staged(&self, staged: &StagedImage) -> Result<AnalysisResult, CoreError> {
        let image = self.image_staging.load(staged).await?;

        let file = self.llm_client.upload_image(image).await?;

        info!(
            file_id = %file.id,
            prompt_version = ANALYSIS_PROMPT_VERSION,
            "Requesting nutrition analysis"
        );

        let raw_response = self
            .llm_client
            .generate_with_file(
                ANALYSIS_PROMPT.to_string(),
                file,
                analysis_result_schema(),
            )
            .await?;

        parse_analysis_result(&raw_response)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bytes::Bytes;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        domain::{
            common::StagingConfig,
            food_analysis::{
                entities::fixtures::{analysis_json, analysis_result},
                ports::MockLLMClient,
                value_objects::{FileReference, ImageFile},
            },
            quota::{
                entities::{CallerKey, QuotaStatus},
                ports::MockQuotaRepository,
            },
            storage::ports::MockImageStagingPort,
        },
        infrastructure::storage::LocalImageStaging,
    };

    fn quota_status(remaining: u32) -> QuotaStatus {
        QuotaStatus {
            limit: 5,
            remaining,
            reset_at: Utc::now() + Duration::hours(24),
            window_secs: 86_400,
        }
    }

    fn staged_image() -> StagedImage {
        StagedImage::new(
            PathBuf::from("/nonexistent/nutrilens-uploads/0192.png"),
            "temp.png".to_string(),
            "image/png".to_string(),
            4,
        )
    }

    fn input(data: &'static [u8]) -> AnalyseFoodInput {
        AnalyseFoodInput {
            caller: CallerKey::new("203.0.113.7"),
            image: ImageFile::new(
                Some("temp.png".to_string()),
                Some("image/png".to_string()),
                Bytes::from_static(data),
            ),
        }
    }

    fn allowing_quota() -> MockQuotaRepository {
        let mut quota = MockQuotaRepository::new();
        quota
            .expect_record_attempt()
            .times(1)
            .returning(|_| Box::pin(async { Ok(QuotaDecision::Allowed(quota_status(4))) }));
        quota
    }

    fn staging_expecting_discard(discard_result: Result<(), CoreError>) -> MockImageStagingPort {
        let mut staging = MockImageStagingPort::new();
        staging
            .expect_stage()
            .times(1)
            .returning(|_| Box::pin(async { Ok(staged_image()) }));
        staging.expect_load().times(1).returning(|staged| {
            let image = ImageFile::new(
                Some(staged.file_name.clone()),
                Some(staged.mime_type.clone()),
                Bytes::from_static(b"\x89PNG"),
            );
            Box::pin(async move { Ok(image) })
        });
        staging
            .expect_discard()
            .times(1)
            .return_once(move |_| Box::pin(async move { discard_result }));
        staging
    }

    fn llm_returning(raw: String) -> MockLLMClient {
        let mut llm = MockLLMClient::new();
        llm.expect_upload_image().times(1).returning(|_| {
            Box::pin(async {
                Ok(FileReference {
                    id: "file-abc123".to_string(),
                })
            })
        });
        llm.expect_generate_with_file()
            .times(1)
            .withf(|prompt, file, schema| {
                prompt == ANALYSIS_PROMPT
                    && file.id == "file-abc123"
                    && schema["properties"]["micronutrients"].is_object()
            })
            .return_once(move |_, _, _| Box::pin(async move { Ok(raw) }));
        llm
    }

    #[tokio::test]
    async fn test_analyse_food_success() {
        let service = Service::new(
            llm_returning(analysis_json().to_string()),
            allowing_quota(),
            staging_expecting_discard(Ok(())),
        );

        let report = service.analyse_food(input(b"\x89PNG")).await.unwrap();

        assert_eq!(report.result, analysis_result());
        assert_eq!(report.quota.remaining, 4);
    }

    #[tokio::test]
    async fn test_empty_image_is_rejected_before_quota() {
        let mut quota = MockQuotaRepository::new();
        quota.expect_record_attempt().times(0);
        let mut llm = MockLLMClient::new();
        llm.expect_upload_image().times(0);
        let mut staging = MockImageStagingPort::new();
        staging.expect_stage().times(0);

        let service = Service::new(llm, quota, staging);
        let err = service.analyse_food(input(b"")).await.unwrap_err();

        assert!(matches!(err, CoreError::MissingImage));
    }

    #[tokio::test]
    async fn test_quota_exceeded_makes_no_external_call() {
        let mut quota = MockQuotaRepository::new();
        quota
            .expect_record_attempt()
            .times(1)
            .returning(|_| Box::pin(async { Ok(QuotaDecision::Exceeded(quota_status(0))) }));
        let mut llm = MockLLMClient::new();
        llm.expect_upload_image().times(0);
        llm.expect_generate_with_file().times(0);
        let mut staging = MockImageStagingPort::new();
        staging.expect_stage().times(0);
        staging.expect_discard().times(0);

        let service = Service::new(llm, quota, staging);
        let err = service.analyse_food(input(b"\x89PNG")).await.unwrap_err();

        match err {
            CoreError::QuotaExceeded(status) => assert_eq!(status.remaining, 0),
            other => panic!("expected quota error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_contract_violation_still_discards_staged_file() {
        let mut broken = analysis_json();
        broken["micronutrients"]["Iron"]
            .as_object_mut()
            .unwrap()
            .remove("category");

        let service = Service::new(
            llm_returning(broken.to_string()),
            allowing_quota(),
            staging_expecting_discard(Ok(())),
        );

        let err = service.analyse_food(input(b"\x89PNG")).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidModelOutput(_)));
    }

    #[tokio::test]
    async fn test_upload_failure_skips_generation_and_discards() {
        let mut llm = MockLLMClient::new();
        llm.expect_upload_image().times(1).returning(|_| {
            Box::pin(async {
                Err(CoreError::ExternalServiceError(
                    "LLM API returned error: 503".to_string(),
                ))
            })
        });
        llm.expect_generate_with_file().times(0);

        let service = Service::new(llm, allowing_quota(), staging_expecting_discard(Ok(())));

        let err = service.analyse_food(input(b"\x89PNG")).await.unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_discard_failure_does_not_fail_analysis() {
        let service = Service::new(
            llm_returning(analysis_json().to_string()),
            allowing_quota(),
            staging_expecting_discard(Err(CoreError::StorageError(
                "permission denied".to_string(),
            ))),
        );

        let report = service.analyse_food(input(b"\x89PNG")).await;
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn test_staging_failure_makes_no_external_call() {
        let mut staging = MockImageStagingPort::new();
        staging.expect_stage().times(1).returning(|_| {
            Box::pin(async { Err(CoreError::StorageError("disk full".to_string())) })
        });
        staging.expect_discard().times(0);
        let mut llm = MockLLMClient::new();
        llm.expect_upload_image().times(0);

        let service = Service::new(llm, allowing_quota(), staging);

        let err = service.analyse_food(input(b"\x89PNG")).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_domain_error_is_a_successful_analysis() {
        let mut no_food = analysis_json();
        no_food["error"] = "No food detected. Please upload a clear photo of a meal.".into();

        let service = Service::new(
            llm_returning(no_food.to_string()),
            allowing_quota(),
            staging_expecting_discard(Ok(())),
        );

        let report = service.analyse_food(input(b"\x89PNG")).await.unwrap();
        assert!(report.result.domain_error().is_some());
    }

    #[tokio::test]
    async fn test_cancelled_analysis_removes_staged_file() {
        let tmp = tempfile::tempdir().unwrap();
        let upload_dir = tmp.path().join("uploads");
        let staging = LocalImageStaging::new(&StagingConfig {
            upload_dir: upload_dir.clone(),
        })
        .await
        .unwrap();

        let mut llm = MockLLMClient::new();
        llm.expect_upload_image().times(1).returning(|_| {
            Box::pin(async {
                Ok(FileReference {
                    id: "file-abc123".to_string(),
                })
            })
        });
        llm.expect_generate_with_file()
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::pending::<Result<String, CoreError>>()));

        let service = Service::new(llm, allowing_quota(), staging);

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            service.analyse_food(input(b"\x89PNG")),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(std::fs::read_dir(&upload_dir).unwrap().count(), 0);
    }
}
