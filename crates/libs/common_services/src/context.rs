use crate::api::analysis::service::AnalysisService;
use crate::database::{
    AnalysisCache, MemoryAnalysisCache, PgAnalysisCacheStore, get_db_pool, run_migrations,
};
use app_state::{AppSettings, CacheBackend};
use color_eyre::Result;
use language_model::OllamaClient;
use ml_analysis::ImageAnalyzer;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

/// Long-lived collaborators shared by every request. Built once by [`ServiceContext::init`]
/// and released with [`ServiceContext::shutdown`].
pub struct ServiceContext {
    pub analysis: AnalysisService,
    pool: Option<PgPool>,
}

impl ServiceContext {
    pub async fn init(settings: &AppSettings) -> Result<Self> {
        let model = OllamaClient::with_base_url(&settings.model.endpoint)
            .model(settings.model.name.clone())
            .build();
        let analyzer = ImageAnalyzer::from_settings(settings, Arc::new(model))?;

        let (cache, pool): (Arc<dyn AnalysisCache>, Option<PgPool>) = match settings.cache.backend
        {
            CacheBackend::Postgres => {
                let pool = get_db_pool(settings).await?;
                if settings.cache.run_migrations {
                    run_migrations(&pool).await?;
                }
                (Arc::new(PgAnalysisCacheStore::new(pool.clone())), Some(pool))
            }
            CacheBackend::Memory => (
                Arc::new(MemoryAnalysisCache::new(settings.cache.memory_capacity)),
                None,
            ),
        };
        info!(
            model = %settings.model.name,
            endpoint = %settings.model.endpoint,
            cache = cache.backend(),
            "Service context ready"
        );

        Ok(Self {
            analysis: AnalysisService::new(Arc::new(analyzer), cache, settings.batch.clone()),
            pool,
        })
    }

    pub async fn shutdown(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
        }
        info!("Service context closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::load_settings_from;

    #[tokio::test]
    async fn memory_backend_needs_no_database() -> Result<()> {
        let mut settings = load_settings_from(None)?;
        settings.cache.backend = CacheBackend::Memory;

        let context = ServiceContext::init(&settings).await?;

        assert_eq!(context.analysis.cache().backend(), "memory");
        context.analysis.cache().ping().await?;
        context.shutdown().await;
        Ok(())
    }
}
