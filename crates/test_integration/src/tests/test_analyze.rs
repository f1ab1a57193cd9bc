use crate::runner::context::test_context::TestContext;
use color_eyre::Result;
use common_types::{EXAMPLE_ANALYSIS_JSON, ImageAnalysis, parse_image_analysis};
use reqwest::StatusCode;
use serde_json::Value;

pub async fn test_analyze_valid_image(context: &TestContext) -> Result<()> {
    // Arrange
    let image_url = context.image_url("glasses.jpg");
    let calls_before = context.model.calls();

    // Act
    let response = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let analysis: ImageAnalysis = response.json().await?;
    assert_eq!(analysis, parse_image_analysis(EXAMPLE_ANALYSIS_JSON)?);
    assert_eq!(context.model.calls(), calls_before + 1);
    assert!(context.staging_is_empty()?);
    Ok(())
}

pub async fn test_analyze_caches_result(context: &TestContext) -> Result<()> {
    // Arrange
    let image_url = context.image_url("glasses.jpg");
    let first = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let calls_before = context.model.calls();

    // Act
    let second = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?
        .json::<Value>()
        .await?;

    // Assert
    assert_eq!(first, second);
    assert_eq!(context.model.calls(), calls_before);
    Ok(())
}

pub async fn test_analyze_reattaches_query(context: &TestContext) -> Result<()> {
    // Arrange
    let image_url = format!("{}?variant=front", context.image_url("glasses.jpg"));

    // Act
    let response = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        context
            .image_host
            .seen()
            .iter()
            .any(|uri| uri == "/glasses.jpg?variant=front")
    );
    Ok(())
}

pub async fn test_analyze_missing_image(context: &TestContext) -> Result<()> {
    // Arrange
    let image_url = context.image_url("missing.jpg");
    let calls_before = context.model.calls();

    // Act
    let response = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "image_fetch");
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("404")));
    assert_eq!(context.model.calls(), calls_before);
    Ok(())
}

pub async fn test_analyze_garbled_model_output(context: &TestContext) -> Result<()> {
    // Arrange
    let image_url = context.image_url("garbled.jpg");
    let calls_before = context.model.calls();

    // Act
    let first = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?;
    let first_status = first.status();
    let body: Value = first.json().await?;
    let second = context
        .http_client
        .get(context.analyze_url(&image_url))
        .send()
        .await?;

    // Assert
    assert_eq!(first_status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "schema_validation");
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    // Nothing was cached, so the model was asked twice.
    assert_eq!(context.model.calls(), calls_before + 2);
    assert!(context.staging_is_empty()?);
    Ok(())
}

pub async fn test_analyze_empty_url(context: &TestContext) -> Result<()> {
    // Act
    let response = context
        .http_client
        .get(context.api_url("/analyze/%20%20"))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "invalid_image_url");
    Ok(())
}

pub async fn test_analyze_url_named_batch(context: &TestContext) -> Result<()> {
    // Arrange
    let calls_before = context.model.calls();

    // Act
    let response = context
        .http_client
        .get(context.analyze_url("batch"))
        .send()
        .await?;

    // Assert
    // `batch` is an image url like any other, so the fetch of https://batch fails.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "image_fetch");
    assert_eq!(context.model.calls(), calls_before);
    Ok(())
}
