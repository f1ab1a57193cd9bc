use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common_services::api::analysis::interfaces::HealthResponse;
use common_services::api::analysis::service::AnalysisService;
use tracing::error;

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "Root message")
    )
)]
pub async fn root() -> &'static str {
    "Eyewear visual analysis API. See /docs."
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "API is healthy and the cache is reachable", body = HealthResponse),
        (status = 503, description = "The cache backend could not be reached", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(service): State<AnalysisService>,
) -> (StatusCode, Json<HealthResponse>) {
    let cache = service.cache();
    let (status, reachable) = match cache.ping().await {
        Ok(()) => (StatusCode::OK, true),
        Err(e) => {
            error!("Health check failed: {} cache error: {}", cache.backend(), e);
            (StatusCode::SERVICE_UNAVAILABLE, false)
        }
    };
    (
        status,
        Json(HealthResponse {
            status: if reachable { "ok" } else { "degraded" }.to_string(),
            cache_backend: cache.backend().to_string(),
            cache_reachable: reachable,
        }),
    )
}
