use std::sync::Arc;

/// Process-scoped service wiring the analysis pipeline to its adapters.
///
/// The model client, quota store and image staging are injected at
/// construction so tests can substitute any of them.
pub struct Service<LLM, Q, S> {
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) quota_repository: Arc<Q>,
    pub(crate) image_staging: Arc<S>,
}

impl<LLM, Q, S> Service<LLM, Q, S> {
    pub fn new(llm_client: LLM, quota_repository: Q, image_staging: S) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            quota_repository: Arc::new(quota_repository),
            image_staging: Arc::new(image_staging),
        }
    }
}

impl<LLM, Q, S> Clone for Service<LLM, Q, S> {
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            quota_repository: Arc::clone(&self.quota_repository),
            image_staging: Arc::clone(&self.image_staging),
        }
    }
}
