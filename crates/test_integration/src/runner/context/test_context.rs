use crate::runner::context::fake_services::{FakeImageHost, FakeModel};
use app_state::{AppSettings, CacheBackend, load_settings_from};
use color_eyre::eyre::{Result, eyre};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The main context for our integration tests: the real API wired to a fake image host
/// and a fake model endpoint, with the in-memory cache.
#[allow(dead_code)]
pub struct TestContext {
    pub settings: AppSettings,
    pub http_client: Client,
    pub image_host: FakeImageHost,
    pub model: FakeModel,
    staging_dir: TempDir,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");
        let image_host = FakeImageHost::spawn().await?;
        let model = FakeModel::spawn().await?;
        let staging_dir = tempfile::tempdir()?;
        let settings = Self::create_test_settings(&model, staging_dir.path().to_path_buf())?;

        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        let http_client = Client::new();
        Self::wait_for_healthy_api(&settings, &http_client).await?;

        info!("Test environment is ready.");
        Ok(Self {
            settings,
            http_client,
            image_host,
            model,
            staging_dir,
            api_handle,
        })
    }

    fn create_test_settings(model: &FakeModel, staging_folder: PathBuf) -> Result<AppSettings> {
        let mut settings = load_settings_from(None)?;
        let port = std::net::TcpListener::bind("127.0.0.1:0")?
            .local_addr()?
            .port();
        settings.api.host = "127.0.0.1".to_string();
        settings.api.port = u32::from(port);
        settings.api.public_url = format!("http://127.0.0.1:{port}");
        settings.model.endpoint.clone_from(&model.base_url);
        settings.model.timeout = Duration::from_secs(5);
        settings.fetch.timeout = Duration::from_secs(2);
        settings.fetch.staging_folder = Some(staging_folder);
        settings.cache.backend = CacheBackend::Memory;
        settings.batch.max_urls = 5;
        Ok(settings)
    }

    /// Polls the `/health` endpoint until it receives a successful response or times out.
    async fn wait_for_healthy_api(settings: &AppSettings, http_client: &Client) -> Result<()> {
        let url = format!("{}/health", settings.api.public_url);
        for attempt in 1..=20 {
            match http_client.get(&url).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => warn!("Health check attempt {attempt}: {}", response.status()),
                Err(e) => info!("Health check attempt {attempt}: {e}"),
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        Err(eyre!("API did not become healthy"))
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api.public_url)
    }

    /// Url of an image on the fake host.
    pub fn image_url(&self, name: &str) -> String {
        format!("{}/{name}", self.image_host.base_url)
    }

    pub fn analyze_url(&self, image_url: &str) -> String {
        self.api_url(&format!("/analyze/{image_url}"))
    }

    pub fn staging_is_empty(&self) -> Result<bool> {
        Ok(std::fs::read_dir(self.staging_dir.path())?.next().is_none())
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.api_handle.abort();
    }
}
