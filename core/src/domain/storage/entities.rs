use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

/// An uploaded image written to temporary storage for the duration of one
/// analysis attempt.
///
/// The handle owns the file: dropping it removes the file unless it was
/// released first. A cancelled request therefore never leaves its upload behind.
#[derive(Debug, PartialEq, Eq)]
pub struct StagedImage {
    path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl StagedImage {
    pub fn new(path: PathBuf, file_name: String, mime_type: String, size_bytes: u64) -> Self {
        Self {
            path,
            file_name,
            mime_type,
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disarms the guard once the file is gone.
    pub fn release(mut self) -> PathBuf {
        std::mem::take(&mut self.path)
    }
}

impl Drop for StagedImage {
    fn drop(&mut self) {
        if self.path.as_os_str().is_empty() {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed abandoned staged upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "Failed to remove staged upload: {}", e),
        }
    }
}
