use crate::api::analysis::interfaces::ErrorBody;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ml_analysis::AnalyzeError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid image url: {0}")]
    InvalidImageUrl(String),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("batch of {count} urls exceeds the limit of {limit}")]
    BatchTooLarge { count: usize, limit: usize },

    #[error("analysis task failed: {0}")]
    Internal(#[from] tokio::task::JoinError),
}

impl AnalysisError {
    /// Stable machine-readable error kind sent to clients.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidImageUrl(_) => "invalid_image_url",
            Self::Analyze(AnalyzeError::ImageFetch(_)) => "image_fetch",
            Self::Analyze(AnalyzeError::ModelInvocation(_) | AnalyzeError::ModelTimeout(_)) => {
                "model_invocation"
            }
            Self::Analyze(AnalyzeError::SchemaValidation(_)) => "schema_validation",
            Self::Analyze(AnalyzeError::Staging(_)) => "staging",
            Self::BatchTooLarge { .. } => "batch_too_large",
            Self::Internal(_) => "internal",
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidImageUrl(_)
            | Self::BatchTooLarge { .. }
            | Self::Analyze(AnalyzeError::ImageFetch(_)) => StatusCode::BAD_REQUEST,
            Self::Analyze(AnalyzeError::SchemaValidation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Analyze(AnalyzeError::ModelInvocation(_) | AnalyzeError::ModelTimeout(_)) => {
                StatusCode::FAILED_DEPENDENCY
            }
            Self::Analyze(AnalyzeError::Staging(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().to_string(),
            detail: self.to_string(),
        }
    }
}

fn log_error(error: &AnalysisError) {
    match error {
        AnalysisError::Analyze(AnalyzeError::Staging(e)) => error!("Staging failed: {e}"),
        AnalysisError::Internal(e) => error!("Analysis task failed: {e}"),
        other => warn!("Analysis request failed ({}): {other}", other.kind()),
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        log_error(&self);
        (self.status_code(), Json(self.to_body())).into_response()
    }
}
