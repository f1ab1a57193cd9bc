use crate::ImageFetchError;
use app_state::FetchSettings;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Downloads product images with a bounded timeout and size. Never retries.
#[derive(Clone)]
pub struct ImageFetcher {
    http: Client,
    timeout: Duration,
    max_bytes: u64,
}

impl ImageFetcher {
    pub fn new(timeout: Duration, max_bytes: u64, user_agent: &str) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            timeout,
            max_bytes,
        })
    }

    pub fn from_settings(settings: &FetchSettings) -> reqwest::Result<Self> {
        Self::new(
            settings.timeout,
            settings.max_image_bytes,
            &settings.user_agent,
        )
    }

    /// Fetch the full body of `url`.
    ///
    /// # Errors
    ///
    /// Returns an `ImageFetchError` on connection failures, timeouts, non-2xx statuses,
    /// empty bodies, or bodies above the configured size limit.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageFetchError> {
        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(self.too_large(url));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.request_error(url, e))?
        {
            if (bytes.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large(url));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(ImageFetchError::Empty {
                url: url.to_string(),
            });
        }
        debug!(size = bytes.len(), "Fetched image");
        Ok(bytes)
    }

    fn request_error(&self, url: &str, source: reqwest::Error) -> ImageFetchError {
        if source.is_timeout() {
            ImageFetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            ImageFetchError::Request {
                url: url.to_string(),
                source,
            }
        }
    }

    fn too_large(&self, url: &str) -> ImageFetchError {
        ImageFetchError::TooLarge {
            url: url.to_string(),
            limit: self.max_bytes,
        }
    }
}
