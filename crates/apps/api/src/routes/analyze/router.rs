use crate::analyze::handlers::{analyze_batch, analyze_image};
use crate::api_state::ApiContext;
use axum::{
    Router,
    routing::{get, post},
};

pub fn analyze_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/batch/analyze", post(analyze_batch))
        .route("/analyze/{*image_url}", get(analyze_image))
}
