use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::value_objects::{AnalyseFoodInput, AnalysisReport, FileReference, ImageFile},
};

/// LLM Client trait for calling vision models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Upload an image and obtain a provider-side reference to it
    fn upload_image(
        &self,
        image: ImageFile,
    ) -> impl Future<Output = Result<FileReference, CoreError>> + Send;

    /// Run one generation over an uploaded file, constrained by a JSON schema.
    /// Returns the raw model text.
    fn generate_with_file(
        &self,
        prompt: String,
        file: FileReference,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for food analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    fn analyse_food(
        &self,
        input: AnalyseFoodInput,
    ) -> impl Future<Output = Result<AnalysisReport, CoreError>> + Send;
}
