use common_types::SchemaValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("cached entry no longer validates: {0}")]
    InvalidEntry(#[from] SchemaValidationError),

    #[error("could not serialize analysis for the cache: {0}")]
    Serialization(#[source] serde_json::Error),
}
