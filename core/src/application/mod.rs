use crate::{
    domain::common::{NutriLensConfig, services::Service},
    infrastructure::{
        llm::OpenAiClient, quota::InMemoryQuotaRepository, storage::LocalImageStaging,
    },
};

pub type NutriLensService = Service<OpenAiClient, InMemoryQuotaRepository, LocalImageStaging>;

pub async fn create_service(config: NutriLensConfig) -> Result<NutriLensService, anyhow::Error> {
    let llm_client = OpenAiClient::new(
        config.llm.openai_api_key,
        config.llm.openai_model,
        &config.llm.openai_base_url,
    )?;

    let quota_repository = InMemoryQuotaRepository::new(&config.quota);
    let image_staging = LocalImageStaging::new(&config.storage).await?;

    tracing::info!(
        model = %llm_client.model_name(),
        quota_limit = config.quota.max_requests,
        quota_window_secs = config.quota.window_secs,
        upload_dir = %config.storage.upload_dir.display(),
        "NutriLens service initialised"
    );

    Ok(Service::new(llm_client, quota_repository, image_staging))
}
