//! Show catalog abstraction
//!
//! The catalog is the source of truth for show and episode facts. TVMaze is
//! the only provider today; the trait keeps handlers and the insight pipeline
//! independent of it, and lets tests substitute fixed data.

use crate::{
    error::AppResult,
    models::{Episode, Show, ShowId},
};

pub mod tvmaze;

pub use tvmaze::TvMazeClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Search shows by name. A blank query yields no results.
    async fn search(&self, query: &str) -> AppResult<Vec<Show>>;

    /// Fetch a show, `None` when the catalog does not know it
    async fn get_by_id(&self, show_id: ShowId) -> AppResult<Option<Show>>;

    /// All episodes of a show; empty when the show has none or is unknown
    async fn get_episodes(&self, show_id: ShowId) -> AppResult<Vec<Episode>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
