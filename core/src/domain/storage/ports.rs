use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::value_objects::ImageFile,
};

use super::entities::StagedImage;

/// Port for temporary storage of uploaded images
#[cfg_attr(test, mockall::automock)]
pub trait ImageStagingPort: Send + Sync {
    /// Write an uploaded image to temporary storage
    fn stage(&self, image: ImageFile)
    -> impl Future<Output = Result<StagedImage, CoreError>> + Send;

    /// Read a staged image back into memory
    fn load(&self, staged: &StagedImage)
    -> impl Future<Output = Result<ImageFile, CoreError>> + Send;

    /// Delete a staged image. Consumes the handle so it can only happen once.
    fn discard(&self, staged: StagedImage) -> impl Future<Output = Result<(), CoreError>> + Send;
}
