use axum::Json;
use axum::extract::{Path, RawQuery, State};
use common_services::api::analysis::error::AnalysisError;
use common_services::api::analysis::interfaces::{
    BatchAnalyzeRequest, BatchItemResult, ErrorBody,
};
use common_services::api::analysis::service::AnalysisService;
use common_types::ImageAnalysis;
use tracing::instrument;

/// Rebuild the image url from the wildcard path segment.
///
/// The query string of the request belongs to the image url. Some proxies merge the
/// `//` after the scheme into one slash, which is undone here.
fn image_url_from_path(path: &str, query: Option<&str>) -> String {
    let mut url = path.to_string();
    for scheme in ["https:/", "http:/"] {
        let merged = url
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            && !url[scheme.len()..].starts_with('/');
        if merged {
            url.insert(scheme.len(), '/');
            break;
        }
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Analyze one eyewear product image.
///
/// The image url is the rest of the path, e.g. `/analyze/https://example.com/a.jpg`.
/// Urls without a scheme are fetched over https.
#[utoipa::path(
    get,
    path = "/analyze/{image_url}",
    tag = "Analysis",
    params(
        ("image_url" = String, Path, description = "Image url, with or without scheme")
    ),
    responses(
        (status = 200, description = "Validated analysis of the image.", body = ImageAnalysis),
        (status = 400, description = "Empty url or the image could not be fetched.", body = ErrorBody),
        (status = 422, description = "The model output did not match the schema.", body = ErrorBody),
        (status = 424, description = "The vision model failed or timed out.", body = ErrorBody),
        (status = 500, description = "The image could not be staged locally.", body = ErrorBody),
    )
)]
#[instrument(skip(service, query))]
pub async fn analyze_image(
    State(service): State<AnalysisService>,
    Path(image_url): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ImageAnalysis>, AnalysisError> {
    let image_url = image_url_from_path(&image_url, query.as_deref());
    Ok(Json(service.analyze(&image_url).await?))
}

/// Analyze a list of image urls.
///
/// Results are returned in input order. Blank entries are skipped. A failing url does
/// not fail the batch, its entry carries an `error` instead of a `result`.
#[utoipa::path(
    post,
    path = "/batch/analyze",
    tag = "Analysis",
    request_body = BatchAnalyzeRequest,
    responses(
        (status = 200, description = "One outcome per non-blank url.", body = Vec<BatchItemResult>),
        (status = 400, description = "Too many urls in one request.", body = ErrorBody),
    )
)]
#[instrument(skip(service, request))]
pub async fn analyze_batch(
    State(service): State<AnalysisService>,
    Json(request): Json<BatchAnalyzeRequest>,
) -> Result<Json<Vec<BatchItemResult>>, AnalysisError> {
    Ok(Json(service.analyze_many(request.urls).await?))
}
