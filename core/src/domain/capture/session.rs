use tracing::{debug, warn};

use crate::domain::food_analysis::{entities::AnalysisResult, value_objects::ImageFile};

use super::{
    entities::{CaptureError, CapturePhase, SubmissionTicket},
    ports::{AnalysisGateway, GatewayError},
};

/// Client-side capture → review → submit → result flow.
///
/// At most one submission is outstanding. A retake or a newer submission
/// invalidates older tickets so late responses cannot overwrite the
/// current state.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    phase: CapturePhase,
    generation: u64,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            phase: CapturePhase::Camera,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &CapturePhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, CapturePhase::Analysing { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            CapturePhase::Showing { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            CapturePhase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// A frame was taken from the camera.
    pub fn capture(&mut self, photo: ImageFile) -> Result<(), CaptureError> {
        match self.phase {
            CapturePhase::Camera => {
                self.phase = CapturePhase::Review { photo };
                Ok(())
            }
            _ => Err(CaptureError::PhotoPending),
        }
    }

    /// Starts an analysis of the current photo.
    pub fn submit(&mut self) -> Result<(SubmissionTicket, ImageFile), CaptureError> {
        let photo = match &self.phase {
            CapturePhase::Camera => return Err(CaptureError::NoPhoto),
            CapturePhase::Analysing { .. } => return Err(CaptureError::InFlight),
            CapturePhase::Review { photo }
            | CapturePhase::Showing { photo, .. }
            | CapturePhase::Failed { photo, .. } => photo.clone(),
        };

        self.generation += 1;
        let ticket = SubmissionTicket {
            generation: self.generation,
        };
        self.phase = CapturePhase::Analysing {
            photo: photo.clone(),
            ticket,
        };

        Ok((ticket, photo))
    }

    /// Back to the camera. Clears any result and invalidates pending tickets.
    pub fn retake(&mut self) {
        self.generation += 1;
        self.phase = CapturePhase::Camera;
    }

    /// Applies a response. Returns `false` when the ticket is stale and the
    /// response was dropped.
    pub fn resolve(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<AnalysisResult, GatewayError>,
    ) -> bool {
        let photo = match &self.phase {
            CapturePhase::Analysing {
                photo,
                ticket: current,
            } if *current == ticket => photo.clone(),
            _ => {
                debug!(generation = ticket.generation, "Dropping stale analysis response");
                return false;
            }
        };

        self.phase = match outcome {
            Ok(result) => CapturePhase::Showing { photo, result },
            Err(e) => {
                warn!(error = %e, "Analysis request failed");
                CapturePhase::Failed {
                    photo,
                    message: e.to_string(),
                }
            }
        };

        true
    }

    /// Submits the current photo through `gateway` and applies the answer.
    pub async fn submit_with<G: AnalysisGateway>(
        &mut self,
        gateway: &G,
    ) -> Result<bool, CaptureError> {
        let (ticket, photo) = self.submit()?;
        let outcome = gateway.analyse(photo).await;
        Ok(self.resolve(ticket, outcome))
    }
}
