use crate::runner::context::test_context::TestContext;
use color_eyre::Result;
use reqwest::StatusCode;
use serde_json::{Value, json};

pub async fn test_batch_mixed_outcomes(context: &TestContext) -> Result<()> {
    // Arrange
    let urls = json!([
        context.image_url("glasses.jpg"),
        "   ",
        context.image_url("missing.jpg"),
        "",
        context.image_url("garbled.jpg"),
    ]);

    // Act
    let response = context
        .http_client
        .post(context.api_url("/batch/analyze"))
        .json(&json!({ "urls": urls }))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let results: Vec<Value> = response.json().await?;
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["image_url"], context.image_url("glasses.jpg"));
    assert!(results[0]["result"]["visual_dimensions"].is_object());
    assert!(results[0].get("error").is_none());
    assert_eq!(results[1]["error"]["error"], "image_fetch");
    assert!(results[1].get("result").is_none());
    assert_eq!(results[2]["error"]["error"], "schema_validation");
    Ok(())
}

pub async fn test_batch_too_large(context: &TestContext) -> Result<()> {
    // Arrange
    let limit = context.settings.batch.max_urls;
    let urls: Vec<String> = (0..=limit)
        .map(|i| context.image_url(&format!("{i}.jpg")))
        .collect();

    // Act
    let response = context
        .http_client
        .post(context.api_url("/batch/analyze"))
        .json(&json!({ "urls": urls }))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "batch_too_large");
    Ok(())
}
