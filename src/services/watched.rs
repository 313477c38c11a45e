use std::sync::Arc;

use crate::{
    db::WatchedStore,
    error::{AppError, AppResult},
    models::{EpisodeId, ShowId, WatchedStatus},
};

pub async fn list_watched(
    store: Arc<dyn WatchedStore>,
    show_id: ShowId,
) -> AppResult<Vec<WatchedStatus>> {
    let watched = store.list(show_id).await?;
    Ok(watched.iter().map(WatchedStatus::from).collect())
}

/// Clears a watched mark; an episode that was not marked is reported as not found
pub async fn unmark_watched(
    store: Arc<dyn WatchedStore>,
    show_id: ShowId,
    episode_id: EpisodeId,
) -> AppResult<()> {
    if store.unmark(show_id, episode_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Episode not marked as watched".to_string()))
    }
}
