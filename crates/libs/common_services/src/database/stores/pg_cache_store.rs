use crate::database::{AnalysisCache, CacheError, fingerprint};
use async_trait::async_trait;
use common_types::{ImageAnalysis, validate_image_analysis};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, instrument};

/// Analyses stored in the `image_analysis_cache` table.
#[derive(Clone)]
pub struct PgAnalysisCacheStore {
    pool: PgPool,
}

impl PgAnalysisCacheStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisCache for PgAnalysisCacheStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self))]
    async fn check(&self, image_url: &str) -> Result<bool, CacheError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM image_analysis_cache WHERE image_hash = $1)",
        )
        .bind(fingerprint(image_url))
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn get(&self, image_url: &str) -> Result<Option<ImageAnalysis>, CacheError> {
        let stored: Option<Json<Value>> = sqlx::query_scalar(
            "SELECT result_json FROM image_analysis_cache WHERE image_hash = $1",
        )
        .bind(fingerprint(image_url))
        .fetch_optional(&self.pool)
        .await?;

        match stored {
            Some(Json(value)) => Ok(Some(validate_image_analysis(value)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, analysis))]
    async fn update(&self, image_url: &str, analysis: &ImageAnalysis) -> Result<(), CacheError> {
        let payload = serde_json::to_value(analysis).map_err(CacheError::Serialization)?;
        sqlx::query(
            r"
            INSERT INTO image_analysis_cache (image_hash, image_url, result_json)
            VALUES ($1, $2, $3)
            ON CONFLICT (image_hash) DO UPDATE
            SET image_url   = EXCLUDED.image_url,
                result_json = EXCLUDED.result_json,
                updated_at  = now()
            ",
        )
        .bind(fingerprint(image_url))
        .bind(image_url)
        .bind(Json(payload))
        .execute(&self.pool)
        .await?;
        debug!("Analysis cached");
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
