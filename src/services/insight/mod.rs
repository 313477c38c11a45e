//! AI insights about shows and episodes.
//!
//! Failures are absorbed in two tiers. [`GenerationClient`] turns every backend
//! failure into its generic fallback sentence. [`InsightService`] runs prompt
//! construction and generation as one isolated task; if that task dies, the
//! subject-specific fallback naming the show is returned instead. Only an
//! unknown subject (`Ok(None)`) or a catalog failure reaches the caller.

use std::sync::Arc;

use crate::{
    db::CommentStore,
    error::AppResult,
    models::{EpisodeId, InsightResult, ShowId},
    services::catalog::CatalogLookup,
};

pub mod generation;
pub mod huggingface;
pub mod prompt;
pub mod sanitize;

pub use generation::{GenerationClient, GenerationError, GenerativeBackend};
pub use huggingface::HuggingFaceBackend;

use prompt::{build_episode_prompt, build_show_prompt, MAX_PROMPT_COMMENTS};

fn show_fallback(show_name: &str) -> String {
    format!(
        "'{}' is a captivating series that delivers compelling storytelling.",
        show_name
    )
}

fn episode_fallback(show_name: &str) -> String {
    format!(
        "This episode of '{}' offers engaging storytelling and character development.",
        show_name
    )
}

#[derive(Clone)]
pub struct InsightService {
    catalog: Arc<dyn CatalogLookup>,
    comments: Option<Arc<dyn CommentStore>>,
    generator: GenerationClient,
}

impl InsightService {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        comments: Option<Arc<dyn CommentStore>>,
        generator: GenerationClient,
    ) -> Self {
        Self {
            catalog,
            comments,
            generator,
        }
    }

    pub async fn get_show_insight(&self, show_id: ShowId) -> AppResult<Option<InsightResult>> {
        let Some(show) = self.catalog.get_by_id(show_id).await? else {
            tracing::debug!(show_id = show_id, "Insight requested for unknown show");
            return Ok(None);
        };

        let comments = match &self.comments {
            Some(store) => store
                .recent_for_show(show_id, MAX_PROMPT_COMMENTS)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, show_id = show_id, "Could not load comments for prompt");
                    Vec::new()
                }),
            None => Vec::new(),
        };

        let fallback = show_fallback(&show.name);
        let insight = self
            .generate_isolated(fallback, move || {
                build_show_prompt(
                    &show.name,
                    show.summary.as_deref(),
                    &show.genres,
                    &comments,
                )
            })
            .await;

        tracing::info!(
            show_id = show_id,
            source = ?insight.origin,
            "Show insight produced"
        );

        Ok(Some(insight))
    }

    pub async fn get_episode_insight(
        &self,
        show_id: ShowId,
        episode_id: EpisodeId,
    ) -> AppResult<Option<InsightResult>> {
        let Some(show) = self.catalog.get_by_id(show_id).await? else {
            tracing::debug!(show_id = show_id, "Insight requested for unknown show");
            return Ok(None);
        };

        let episodes = self.catalog.get_episodes(show_id).await?;
        let Some(episode) = episodes.into_iter().find(|e| e.id == episode_id) else {
            tracing::debug!(
                show_id = show_id,
                episode_id = episode_id,
                "Insight requested for episode not in show"
            );
            return Ok(None);
        };

        let comments = match &self.comments {
            Some(store) => store
                .recent_for_episode(episode_id, MAX_PROMPT_COMMENTS)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, episode_id = episode_id, "Could not load comments for prompt");
                    Vec::new()
                }),
            None => Vec::new(),
        };

        let fallback = episode_fallback(&show.name);
        let insight = self
            .generate_isolated(fallback, move || {
                build_episode_prompt(
                    &show.name,
                    &episode.name,
                    episode.season,
                    episode.number,
                    episode.summary.as_deref(),
                    &show.genres,
                    &comments,
                )
            })
            .await;

        tracing::info!(
            show_id = show_id,
            episode_id = episode_id,
            source = ?insight.origin,
            "Episode insight produced"
        );

        Ok(Some(insight))
    }

    /// Builds the prompt and generates on a separate task. A panic anywhere in
    /// that task yields `fallback` with the fallback origin.
    async fn generate_isolated<F>(&self, fallback: String, build_prompt: F) -> InsightResult
    where
        F: FnOnce() -> String + Send + 'static,
    {
        let generator = self.generator.clone();
        let task = tokio::spawn(async move {
            let prompt = build_prompt();
            generator.generate(&prompt).await
        });

        match task.await {
            Ok(insight) => insight,
            Err(e) => {
                tracing::error!(error = %e, "Insight task failed, using subject fallback");
                InsightResult::fallback(fallback)
            }
        }
    }
}
