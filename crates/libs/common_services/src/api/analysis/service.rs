use crate::api::analysis::error::AnalysisError;
use crate::api::analysis::interfaces::BatchItemResult;
use crate::database::AnalysisCache;
use app_state::BatchSettings;
use common_types::ImageAnalysis;
use futures_util::{StreamExt, stream};
use ml_analysis::{AnalyzeError, Analyzer};
use std::sync::Arc;
use tracing::{Instrument, debug, info, instrument, warn};

/// Trim the raw input and make sure it carries a scheme.
///
/// Urls that already start with `http://` or `https://` (any case) are kept as they are,
/// anything else gets `https://` prepended.
pub fn normalize_image_url(raw: &str) -> Result<String, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidImageUrl(
            "image url is empty".to_string(),
        ));
    }
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        trimmed
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if has_scheme {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{trimmed}"))
    }
}

/// Cache-first front door for image analysis.
#[derive(Clone)]
pub struct AnalysisService {
    analyzer: Arc<dyn Analyzer>,
    cache: Arc<dyn AnalysisCache>,
    batch: BatchSettings,
}

impl AnalysisService {
    #[must_use]
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        cache: Arc<dyn AnalysisCache>,
        batch: BatchSettings,
    ) -> Self {
        Self {
            analyzer,
            cache,
            batch,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<dyn AnalysisCache> {
        &self.cache
    }

    #[must_use]
    pub const fn batch_settings(&self) -> &BatchSettings {
        &self.batch
    }

    /// Analyze one image, serving from the cache when possible.
    ///
    /// The cache never causes a failure: read problems count as a miss and write
    /// problems are only logged. The analysis and the cache write run on their own
    /// task, so dropping this future does not abort a running model call.
    #[instrument(skip(self))]
    pub async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis, AnalysisError> {
        let url = normalize_image_url(image_url)?;

        if let Some(analysis) = self.cached(&url).await {
            return Ok(analysis);
        }

        let analyzer = Arc::clone(&self.analyzer);
        let cache = Arc::clone(&self.cache);
        let task = tokio::spawn(
            async move {
                let analysis = analyzer.run(&url).await?;
                if let Err(e) = cache.update(&url, &analysis).await {
                    warn!("Could not write analysis to the {} cache: {e}", cache.backend());
                }
                Ok::<_, AnalyzeError>(analysis)
            }
            .in_current_span(),
        );

        Ok(task.await??)
    }

    async fn cached(&self, url: &str) -> Option<ImageAnalysis> {
        match self.cache.check(url).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Cache miss");
                return None;
            }
            Err(e) => {
                warn!("Cache lookup failed, analyzing anyway: {e}");
                return None;
            }
        }

        match self.cache.get(url).await {
            Ok(Some(analysis)) => {
                info!("Cache hit");
                Some(analysis)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Discarding cached entry: {e}");
                None
            }
        }
    }

    /// Analyze a list of urls with bounded concurrency. Blank entries are skipped and
    /// results come back in input order, one per remaining url.
    #[instrument(skip(self, urls), fields(count = urls.len()))]
    pub async fn analyze_many(
        &self,
        urls: Vec<String>,
    ) -> Result<Vec<BatchItemResult>, AnalysisError> {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if urls.len() > self.batch.max_urls {
            return Err(AnalysisError::BatchTooLarge {
                count: urls.len(),
                limit: self.batch.max_urls,
            });
        }

        let results = stream::iter(urls)
            .map(|url| async move {
                match self.analyze(&url).await {
                    Ok(analysis) => BatchItemResult {
                        image_url: url,
                        result: Some(analysis),
                        error: None,
                    },
                    Err(e) => BatchItemResult {
                        image_url: url,
                        result: None,
                        error: Some(e.to_body()),
                    },
                }
            })
            .buffered(self.batch.concurrency.max(1))
            .collect()
            .await;
        Ok(results)
    }
}
