use thiserror::Error;

use crate::domain::food_analysis::{entities::AnalysisResult, value_objects::ImageFile};

/// Issued for each submission; only the newest ticket may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket {
    pub(crate) generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CapturePhase {
    Camera,
    Review {
        photo: ImageFile,
    },
    Analysing {
        photo: ImageFile,
        ticket: SubmissionTicket,
    },
    Showing {
        photo: ImageFile,
        result: AnalysisResult,
    },
    Failed {
        photo: ImageFile,
        message: String,
    },
}

impl CapturePhase {
    pub fn photo(&self) -> Option<&ImageFile> {
        match self {
            CapturePhase::Camera => None,
            CapturePhase::Review { photo }
            | CapturePhase::Analysing { photo, .. }
            | CapturePhase::Showing { photo, .. }
            | CapturePhase::Failed { photo, .. } => Some(photo),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("No photo has been captured")]
    NoPhoto,

    #[error("An analysis is already in progress")]
    InFlight,

    #[error("Retake the photo before capturing again")]
    PhotoPending,
}
