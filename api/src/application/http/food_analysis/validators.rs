use utoipa::ToSchema;

/// Multipart form accepted by the analysis endpoint
#[derive(Debug, ToSchema)]
pub struct AnalyseFoodForm {
    /// The meal photo
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
