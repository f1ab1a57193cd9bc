use common_types::SchemaValidationError;
use language_model::LlmError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("timed out fetching {url} after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} returned an empty body")]
    Empty { url: String },

    #[error("{url} is larger than the {limit} byte limit")]
    TooLarge { url: String, limit: u64 },
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("image fetch failed: {0}")]
    ImageFetch(#[from] ImageFetchError),

    #[error("model invocation failed: {0}")]
    ModelInvocation(#[from] LlmError),

    #[error("model invocation timed out after {0:?}")]
    ModelTimeout(Duration),

    #[error(transparent)]
    SchemaValidation(#[from] SchemaValidationError),

    #[error("could not stage image locally: {0}")]
    Staging(#[source] std::io::Error),
}
