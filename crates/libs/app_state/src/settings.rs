use crate::{
    ApiSettings, BatchSettings, CacheBackend, LoggingSettings, RawSettings, SecretSettings,
};
use color_eyre::eyre::{Result, bail};
use std::path::{PathBuf, absolute};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub model: ModelSettings,
    pub fetch: FetchSettings,
    pub cache: CacheSettings,
    pub batch: BatchSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub endpoint: String,
    pub name: String,
    /// Upper bound for one complete model call, including stream consumption.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub max_image_bytes: u64,
    /// Where staged image copies are written. `None` uses the system temp dir.
    pub staging_folder: Option<PathBuf>,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub memory_capacity: u64,
    pub run_migrations: bool,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        if raw.model.timeout_seconds == 0 {
            bail!("model.timeout_seconds must be greater than zero");
        }
        if raw.fetch.timeout_seconds == 0 {
            bail!("fetch.timeout_seconds must be greater than zero");
        }
        if raw.batch.concurrency == 0 {
            bail!("batch.concurrency must be greater than zero");
        }

        let staging_folder = match raw.fetch.staging_folder.trim() {
            "" => None,
            folder => Some(absolute(folder)?),
        };
        let db = raw.cache.database;

        Ok(Self {
            logging: raw.logging,
            api: raw.api,
            model: ModelSettings {
                endpoint: raw.model.endpoint.trim_end_matches('/').to_string(),
                name: raw.model.name,
                timeout: Duration::from_secs(raw.model.timeout_seconds),
            },
            fetch: FetchSettings {
                timeout: Duration::from_secs(raw.fetch.timeout_seconds),
                max_image_bytes: raw.fetch.max_image_bytes,
                staging_folder,
                user_agent: raw.fetch.user_agent,
            },
            cache: CacheSettings {
                backend: raw.cache.backend,
                memory_capacity: raw.cache.memory_capacity,
                run_migrations: raw.cache.run_migrations,
                database: DatabaseSettings {
                    max_connections: db.max_connections,
                    min_connections: db.min_connection,
                    max_lifetime: Duration::from_secs(db.max_lifetime),
                    idle_timeout: Duration::from_secs(db.idle_timeout),
                    acquire_timeout: Duration::from_secs(db.acquire_timeout),
                },
            },
            batch: raw.batch,
            secrets: raw.secrets,
        })
    }
}
