use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{EpisodeId, ShowId, WatchedEpisode},
};

/// Keyed store for per-episode watched markers
#[async_trait::async_trait]
pub trait WatchedStore: Send + Sync {
    async fn list(&self, show_id: ShowId) -> AppResult<Vec<WatchedEpisode>>;

    async fn is_watched(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<bool>;

    /// Idempotent: marking twice keeps the original timestamp
    async fn mark(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<WatchedEpisode>;

    /// Returns whether a marker was removed
    async fn unmark(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<bool>;
}

/// PostgreSQL-backed watched store
#[derive(Clone)]
pub struct PgWatchedStore {
    pool: PgPool,
}

impl PgWatchedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WatchedStore for PgWatchedStore {
    async fn list(&self, show_id: ShowId) -> AppResult<Vec<WatchedEpisode>> {
        let watched = sqlx::query_as::<_, WatchedEpisode>(
            r#"
            SELECT show_id, episode_id, watched_at
            FROM watched_episodes
            WHERE show_id = $1
            ORDER BY watched_at
            "#,
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(watched)
    }

    async fn is_watched(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM watched_episodes
                WHERE show_id = $1 AND episode_id = $2
            )
            "#,
        )
        .bind(show_id)
        .bind(episode_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn mark(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<WatchedEpisode> {
        sqlx::query(
            r#"
            INSERT INTO watched_episodes (show_id, episode_id)
            VALUES ($1, $2)
            ON CONFLICT (show_id, episode_id) DO NOTHING
            "#,
        )
        .bind(show_id)
        .bind(episode_id)
        .execute(&self.pool)
        .await?;

        let watched = sqlx::query_as::<_, WatchedEpisode>(
            r#"
            SELECT show_id, episode_id, watched_at
            FROM watched_episodes
            WHERE show_id = $1 AND episode_id = $2
            "#,
        )
        .bind(show_id)
        .bind(episode_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(show_id, episode_id, "Episode marked watched");

        Ok(watched)
    }

    async fn unmark(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM watched_episodes WHERE show_id = $1 AND episode_id = $2")
                .bind(show_id)
                .bind(episode_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
