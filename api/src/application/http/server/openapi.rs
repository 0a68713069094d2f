use crate::application::http::food_analysis::router::FoodAnalysisApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriLens API",
        description = "Nutritional breakdown of meal photos"
    ),
    paths(crate::application::http::health::health),
    nest(
        (path = "/api", api = FoodAnalysisApiDoc),
    )
)]
pub struct ApiDoc;
