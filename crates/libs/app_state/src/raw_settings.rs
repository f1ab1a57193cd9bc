use serde::{Deserialize, Serialize};

/// Settings exactly as they appear in yaml/env, before conversion to typed values.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub model: RawModelSettings,
    pub fetch: RawFetchSettings,
    pub cache: RawCacheSettings,
    pub batch: BatchSettings,
    pub secrets: SecretSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
}

/// Sampling parameters are not configurable, so unknown keys here are rejected.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawModelSettings {
    /// Base url of the Ollama-compatible server, without the `/api/chat` path.
    pub endpoint: String,
    pub name: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawFetchSettings {
    pub timeout_seconds: u64,
    pub max_image_bytes: u64,
    pub staging_folder: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawCacheSettings {
    pub backend: CacheBackend,
    pub memory_capacity: u64,
    pub run_migrations: bool,
    pub database: DatabaseConstants,
}

/// Which store backs the analysis cache.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Postgres,
    Memory,
}

/// Database connection pool configuration, timings in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatchSettings {
    /// Upper bound on the number of urls accepted in one batch request.
    pub max_urls: usize,
    /// How many analyses of one batch may run at the same time.
    pub concurrency: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
}
