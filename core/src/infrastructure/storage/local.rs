use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{error, instrument};

use crate::domain::{
    common::{StagingConfig, entities::app_errors::CoreError, generate_uuid_v7},
    food_analysis::value_objects::ImageFile,
    storage::{entities::StagedImage, ports::ImageStagingPort},
};

/// Stages uploads as uniquely named files under a local directory.
#[derive(Debug, Clone)]
pub struct LocalImageStaging {
    upload_dir: PathBuf,
}

impl LocalImageStaging {
    pub async fn new(config: &StagingConfig) -> Result<Self, CoreError> {
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .map_err(|e| {
                error!(dir = %config.upload_dir.display(), "Failed to create upload directory: {}", e);
                CoreError::StorageError(format!(
                    "cannot create upload directory {}: {}",
                    config.upload_dir.display(),
                    e
                ))
            })?;

        Ok(Self {
            upload_dir: config.upload_dir.clone(),
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn staged_path(&self, file_name: &str) -> PathBuf {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        self.upload_dir
            .join(format!("{}{}", generate_uuid_v7().simple(), extension))
    }
}

impl ImageStagingPort for LocalImageStaging {
    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.len()))]
    async fn stage(&self, image: ImageFile) -> Result<StagedImage, CoreError> {
        // Guard first, so a failed or cancelled write takes the partial file with it
        let staged = StagedImage::new(
            self.staged_path(&image.file_name),
            image.file_name,
            image.mime_type,
            image.data.len() as u64,
        );

        tokio::fs::write(staged.path(), &image.data)
            .await
            .map_err(|e| {
                error!(path = %staged.path().display(), "Failed to stage upload: {}", e);
                CoreError::StorageError(format!("failed to write staged image: {}", e))
            })?;

        Ok(staged)
    }

    #[instrument(skip(self, staged), fields(path = %staged.path().display()))]
    async fn load(&self, staged: &StagedImage) -> Result<ImageFile, CoreError> {
        let data = tokio::fs::read(staged.path()).await.map_err(|e| {
            error!("Failed to read staged upload: {}", e);
            CoreError::StorageError(format!("failed to read staged image: {}", e))
        })?;

        Ok(ImageFile {
            file_name: staged.file_name.clone(),
            mime_type: staged.mime_type.clone(),
            data: Bytes::from(data),
        })
    }

    #[instrument(skip(self, staged), fields(path = %staged.path().display()))]
    async fn discard(&self, staged: StagedImage) -> Result<(), CoreError> {
        tokio::fs::remove_file(staged.path())
            .await
            .map_err(|e| CoreError::StorageError(format!("failed to remove staged image: {}", e)))?;

        staged.release();
        Ok(())
    }
}
