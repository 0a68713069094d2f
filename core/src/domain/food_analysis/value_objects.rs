use bytes::Bytes;

use crate::domain::{
    food_analysis::entities::AnalysisResult,
    quota::entities::{CallerKey, QuotaStatus},
};

pub const DEFAULT_IMAGE_NAME: &str = "photo.png";
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// An in-memory image as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(file_name: Option<String>, mime_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string()),
            mime_type: mime_type
                .filter(|mime| !mime.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Handle returned by the model provider for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct AnalyseFoodInput {
    pub caller: CallerKey,
    pub image: ImageFile,
}

/// A successful analysis together with the caller's remaining quota.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub quota: QuotaStatus,
}
