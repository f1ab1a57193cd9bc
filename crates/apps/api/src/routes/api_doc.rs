use crate::routes::{analyze, root};
use common_services::api::analysis::interfaces::{
    BatchAnalyzeRequest, BatchItemResult, ErrorBody, HealthResponse,
};
use common_types::ImageAnalysis;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        analyze::handlers::analyze_image,
        analyze::handlers::analyze_batch,
    ),
    components(
        schemas(
            ImageAnalysis,
            ErrorBody,
            BatchAnalyzeRequest,
            BatchItemResult,
            HealthResponse,
        ),
    ),
    tags(
        (name = "Analysis", description = "Structured visual analysis of eyewear product images"),
        (name = "System", description = "Banner and health check"),
    )
)]
pub struct ApiDoc;
