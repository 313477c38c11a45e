use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::{
        create_pool, create_redis_client, Cache, CacheWriterHandle, CommentStore, PgCommentStore,
        PgWatchedStore, WatchedStore,
    },
    services::{
        catalog::{CatalogLookup, TvMazeClient},
        insight::{GenerationClient, GenerativeBackend, HuggingFaceBackend, InsightService},
    },
};

/// Shared handler state. Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogLookup>,
    pub comments: Arc<dyn CommentStore>,
    pub watched: Arc<dyn WatchedStore>,
    pub insights: Arc<InsightService>,
}

impl AppState {
    /// Wires the insight pipeline to the same catalog and comment store the
    /// handlers use
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        comments: Arc<dyn CommentStore>,
        watched: Arc<dyn WatchedStore>,
        generator: GenerationClient,
    ) -> Self {
        let insights = Arc::new(InsightService::new(
            catalog.clone(),
            Some(comments.clone()),
            generator,
        ));

        Self {
            catalog,
            comments,
            watched,
            insights,
        }
    }
}

/// Owns every long-lived resource of the process.
///
/// Built once at startup from [`Config`]; [`AppContext::shutdown`] releases
/// the resources after the server stops.
pub struct AppContext {
    state: AppState,
    db_pool: PgPool,
    cache_writer: Option<CacheWriterHandle>,
}

impl AppContext {
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let db_pool = create_pool(&config.database_url).await?;
        tracing::info!("Database connection established");

        let (cache, cache_writer) = match &config.redis_url {
            Some(url) => connect_cache(url).await,
            None => {
                tracing::info!("REDIS_URL not set, catalog responses will not be cached");
                (None, None)
            }
        };

        let catalog = TvMazeClient::new(
            config.catalog_api_url.clone(),
            config.catalog_timeout(),
            cache,
        )?;

        let backend: Option<Arc<dyn GenerativeBackend>> = match config.huggingface_api_key() {
            Some(key) => {
                let backend = HuggingFaceBackend::new(
                    key.to_string(),
                    config.huggingface_api_url.clone(),
                    config.huggingface_model.clone(),
                    config.generation_timeout(),
                )?;
                tracing::info!(model = %config.huggingface_model, "Insight generation enabled");
                Some(Arc::new(backend))
            }
            None => {
                tracing::warn!("HUGGINGFACE_API_KEY not set, insights will use fallback text");
                None
            }
        };

        let state = AppState::new(
            Arc::new(catalog),
            Arc::new(PgCommentStore::new(db_pool.clone())),
            Arc::new(PgWatchedStore::new(db_pool.clone())),
            GenerationClient::new(backend),
        );

        Ok(Self {
            state,
            db_pool,
            cache_writer,
        })
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Flushes pending cache writes and closes the database pool
    pub async fn shutdown(self) {
        tracing::info!("Releasing application resources");

        if let Some(cache_writer) = self.cache_writer {
            cache_writer.shutdown().await;
        }

        self.db_pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// Redis is optional; a configured but unreachable instance only disables caching
async fn connect_cache(redis_url: &str) -> (Option<Cache>, Option<CacheWriterHandle>) {
    let client = match create_redis_client(redis_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid REDIS_URL, running without cache");
            return (None, None);
        }
    };

    match Cache::new(client).await {
        Ok((cache, handle)) => {
            tracing::info!("Redis cache connected");
            (Some(cache), Some(handle))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis unavailable, running without cache");
            (None, None)
        }
    }
}
