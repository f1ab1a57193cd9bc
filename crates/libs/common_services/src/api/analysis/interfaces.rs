use common_types::ImageAnalysis;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned for every failed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// One of `invalid_image_url`, `image_fetch`, `model_invocation`,
    /// `schema_validation`, `staging`, `batch_too_large`, `internal`.
    #[schema(example = "image_fetch")]
    pub error: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchAnalyzeRequest {
    #[schema(example = json!(["example.com/a.jpg", "https://example.com/b.png"]))]
    pub urls: Vec<String>,
}

/// Outcome for one url of a batch. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchItemResult {
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ImageAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub cache_backend: String,
    pub cache_reachable: bool,
}
