use crate::{AnalyzeError, ImageFetcher, analysis_prompt, stage_image};
use app_state::AppSettings;
use async_trait::async_trait;
use common_types::{ImageAnalysis, image_analysis_schema, parse_image_analysis};
use language_model::{LlmResult, VisionModel, collect_text};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Turns an image url into a validated [`ImageAnalysis`].
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn run(&self, image_url: &str) -> Result<ImageAnalysis, AnalyzeError>;
}

pub struct ImageAnalyzer {
    fetcher: ImageFetcher,
    model: Arc<dyn VisionModel>,
    staging_folder: Option<PathBuf>,
    model_timeout: Duration,
}

impl ImageAnalyzer {
    #[must_use]
    pub fn new(
        fetcher: ImageFetcher,
        model: Arc<dyn VisionModel>,
        staging_folder: Option<PathBuf>,
        model_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            model,
            staging_folder,
            model_timeout,
        }
    }

    /// Build an analyzer from app settings around an already constructed model client.
    pub fn from_settings(
        settings: &AppSettings,
        model: Arc<dyn VisionModel>,
    ) -> reqwest::Result<Self> {
        Ok(Self::new(
            ImageFetcher::from_settings(&settings.fetch)?,
            model,
            settings.fetch.staging_folder.clone(),
            settings.model.timeout,
        ))
    }

    async fn stream_response(&self, image: &Path) -> LlmResult<String> {
        let stream = self
            .model
            .stream_chat(analysis_prompt(), &[image], Some(image_analysis_schema()))
            .await?;
        collect_text(stream).await
    }

    /// Stream the model's answer for a staged image and concatenate it.
    async fn invoke_model(&self, image: &Path) -> Result<String, AnalyzeError> {
        let text = tokio::time::timeout(self.model_timeout, self.stream_response(image))
            .await
            .map_err(|_| AnalyzeError::ModelTimeout(self.model_timeout))??;
        debug!(chars = text.len(), "Model response assembled");
        Ok(text)
    }

    async fn analyze_staged(&self, image: &Path) -> Result<ImageAnalysis, AnalyzeError> {
        let raw = self.invoke_model(image).await?;
        Ok(parse_image_analysis(&raw)?)
    }
}

#[async_trait]
impl Analyzer for ImageAnalyzer {
    #[instrument(skip(self), fields(model = self.model.model_name()))]
    async fn run(&self, image_url: &str) -> Result<ImageAnalysis, AnalyzeError> {
        let bytes = self.fetcher.fetch(image_url).await?;
        // Dropping `staged` deletes the file, which also covers early returns and
        // cancellation of this future.
        let staged = stage_image(&bytes, self.staging_folder.as_deref())
            .await
            .map_err(AnalyzeError::Staging)?;
        drop(bytes);

        let outcome = self.analyze_staged(staged.path()).await;
        if let Err(e) = staged.close() {
            warn!("Failed to remove staged image: {e}");
        }

        match &outcome {
            Ok(_) => info!("Image analyzed"),
            Err(e) => warn!("Image analysis failed: {e}"),
        }
        outcome
    }
}
