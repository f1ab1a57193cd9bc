use crate::database::{AnalysisCache, CacheError, fingerprint};
use async_trait::async_trait;
use common_types::ImageAnalysis;
use moka::future::Cache;

/// In-process cache for development and tests. Entries are lost on restart.
#[derive(Clone)]
pub struct MemoryAnalysisCache {
    entries: Cache<String, ImageAnalysis>,
}

impl MemoryAnalysisCache {
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Whether an entry is stored under the given [`fingerprint`].
    #[must_use]
    pub fn contains_fingerprint(&self, hash: &str) -> bool {
        self.entries.contains_key(hash)
    }
}

#[async_trait]
impl AnalysisCache for MemoryAnalysisCache {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn check(&self, image_url: &str) -> Result<bool, CacheError> {
        Ok(self.entries.contains_key(&fingerprint(image_url)))
    }

    async fn get(&self, image_url: &str) -> Result<Option<ImageAnalysis>, CacheError> {
        Ok(self.entries.get(&fingerprint(image_url)).await)
    }

    async fn update(&self, image_url: &str, analysis: &ImageAnalysis) -> Result<(), CacheError> {
        self.entries
            .insert(fingerprint(image_url), analysis.clone())
            .await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::Result;
    use common_types::{EXAMPLE_ANALYSIS_JSON, FrameGeometry, parse_image_analysis};

    #[tokio::test]
    async fn miss_then_hit() -> Result<()> {
        let cache = MemoryAnalysisCache::new(16);
        let url = "https://example.com/a.jpg";
        let analysis = parse_image_analysis(EXAMPLE_ANALYSIS_JSON)?;

        assert!(!cache.check(url).await?);
        assert!(cache.get(url).await?.is_none());

        cache.update(url, &analysis).await?;

        assert!(cache.check(url).await?);
        assert_eq!(cache.get(url).await?, Some(analysis));
        assert!(!cache.check("https://example.com/b.jpg").await?);
        Ok(())
    }

    #[tokio::test]
    async fn last_write_wins() -> Result<()> {
        let cache = MemoryAnalysisCache::new(16);
        let url = "https://example.com/a.jpg";
        let first = parse_image_analysis(EXAMPLE_ANALYSIS_JSON)?;
        let mut second = first.clone();
        second.visual_attributes.frame_geometry = FrameGeometry::Round;

        cache.update(url, &first).await?;
        cache.update(url, &second).await?;

        assert_eq!(cache.get(url).await?, Some(second));
        Ok(())
    }
}
