#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

use color_eyre::Result;
use common_services::api::analysis::interfaces::BatchItemResult;
use common_services::api::analysis::service::AnalysisService;
use tracing::info;

/// One url per line. Blank lines are skipped.
#[must_use]
pub fn read_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Analyze any number of urls, in batches no larger than the service accepts.
pub async fn analyze_all(
    service: &AnalysisService,
    urls: Vec<String>,
) -> Result<Vec<BatchItemResult>> {
    let batch_size = service.batch_settings().max_urls.max(1);
    let mut results = Vec::with_capacity(urls.len());
    for (i, chunk) in urls.chunks(batch_size).enumerate() {
        info!("Analyzing batch {} ({} urls)", i + 1, chunk.len());
        results.extend(service.analyze_many(chunk.to_vec()).await?);
    }
    Ok(results)
}
