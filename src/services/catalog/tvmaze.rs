//! TVMaze catalog provider
//!
//! API Flow:
//! 1. Search: `/search/shows?q=` → `[{score, show}]`
//! 2. Show: `/shows/{id}` → show facts, 404 for unknown ids
//! 3. Episodes: `/shows/{id}/episodes` → flat episode list, 404 for unknown ids

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{ApiEpisode, ApiSearchResult, ApiShow, Episode, Show, ShowId},
    services::catalog::CatalogLookup,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const SHOW_CACHE_TTL: u64 = 86400; // 1 day

#[derive(Clone)]
pub struct TvMazeClient {
    http_client: HttpClient,
    api_url: String,
    cache: Option<Cache>,
}

impl TvMazeClient {
    /// Builds the client once; it is reused for every request until shutdown
    pub fn new(api_url: String, timeout: Duration, cache: Option<Cache>) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// GETs a JSON document; `None` when the catalog answers 404
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Option<T>> {
        let url = format!("{}{}", self.api_url, path);

        let response = self.http_client.get(&url).query(query).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TVMaze API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let parsed = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                response = %response_text,
                "Failed to deserialize TVMaze response"
            );
            AppError::ExternalApi(format!("Failed to parse TVMaze response: {}", e))
        })?;

        Ok(Some(parsed))
    }
}

#[async_trait::async_trait]
impl CatalogLookup for TvMazeClient {
    async fn search(&self, query: &str) -> AppResult<Vec<Show>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(vec![]);
        }

        let key = CacheKey::ShowSearch(query.to_string());
        cached!(self.cache.as_ref(), key, SEARCH_CACHE_TTL, async move {
            let results: Vec<ApiSearchResult> = self
                .get_json("/search/shows", &[("q", query)])
                .await?
                .unwrap_or_default();

            let shows: Vec<Show> = results
                .into_iter()
                .map(|result| result.show.into_search_show())
                .collect();

            tracing::info!(
                query = %query,
                results = shows.len(),
                provider = self.name(),
                "Show search completed"
            );

            Ok(shows)
        })
    }

    async fn get_by_id(&self, show_id: ShowId) -> AppResult<Option<Show>> {
        let key = CacheKey::Show(show_id);
        cached!(self.cache.as_ref(), key, SHOW_CACHE_TTL, async move {
            let show = self
                .get_json::<ApiShow>(&format!("/shows/{}", show_id), &[])
                .await?
                .map(Show::from);

            tracing::debug!(
                show_id = show_id,
                found = show.is_some(),
                provider = self.name(),
                "Show fetched"
            );

            Ok(show)
        })
    }

    async fn get_episodes(&self, show_id: ShowId) -> AppResult<Vec<Episode>> {
        let key = CacheKey::Episodes(show_id);
        cached!(self.cache.as_ref(), key, SHOW_CACHE_TTL, async move {
            let episodes: Vec<Episode> = self
                .get_json::<Vec<ApiEpisode>>(&format!("/shows/{}/episodes", show_id), &[])
                .await?
                .unwrap_or_default()
                .into_iter()
                .map(|episode| episode.into_episode(show_id))
                .collect();

            tracing::debug!(
                show_id = show_id,
                episodes = episodes.len(),
                provider = self.name(),
                "Episodes fetched"
            );

            Ok(episodes)
        })
    }

    fn name(&self) -> &'static str {
        "tvmaze"
    }
}
