use crate::database::CacheError;
use async_trait::async_trait;
use common_types::ImageAnalysis;
use sha2::{Digest, Sha256};

/// Cache key for an image url: the sha256 hex digest of the url string.
#[must_use]
pub fn fingerprint(image_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image_url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Durable lookup of finished analyses, keyed by [`fingerprint`] of the url.
///
/// Implementations only ever hand out payloads that still validate; a stored
/// entry that does not is reported as [`CacheError::InvalidEntry`].
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    async fn check(&self, image_url: &str) -> Result<bool, CacheError>;

    async fn get(&self, image_url: &str) -> Result<Option<ImageAnalysis>, CacheError>;

    /// Insert or replace the entry for `image_url`. Last writer wins.
    async fn update(&self, image_url: &str, analysis: &ImageAnalysis) -> Result<(), CacheError>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), CacheError>;
}
