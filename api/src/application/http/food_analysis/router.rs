use super::handlers::analyse_food_image::{__path_analyse_food_image, analyse_food_image};
use crate::application::{caller_middleware::caller_middleware, http::server::app_state::AppState};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::post,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyse_food_image))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/analyse-food", state.args.server.root_path),
            post(analyse_food_image),
        )
        .layer(DefaultBodyLimit::max(state.args.server.max_upload_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            caller_middleware,
        ))
}
