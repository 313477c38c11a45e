use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{EpisodeId, ShowId, WatchedStatus},
    services::watched,
    state::AppState,
};

use super::extract::AppPath;

pub async fn list_watched(
    State(state): State<AppState>,
    AppPath(show_id): AppPath<ShowId>,
) -> AppResult<Json<Vec<WatchedStatus>>> {
    Ok(Json(watched::list_watched(state.watched.clone(), show_id).await?))
}

pub async fn is_watched(
    State(state): State<AppState>,
    AppPath((show_id, episode_id)): AppPath<(ShowId, EpisodeId)>,
) -> AppResult<Json<Value>> {
    let watched = state.watched.is_watched(show_id, episode_id).await?;
    Ok(Json(json!({ "watched": watched })))
}

pub async fn mark_watched(
    State(state): State<AppState>,
    AppPath((show_id, episode_id)): AppPath<(ShowId, EpisodeId)>,
) -> AppResult<Json<Value>> {
    state.watched.mark(show_id, episode_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn unmark_watched(
    State(state): State<AppState>,
    AppPath((show_id, episode_id)): AppPath<(ShowId, EpisodeId)>,
) -> AppResult<Json<Value>> {
    watched::unmark_watched(state.watched.clone(), show_id, episode_id).await?;
    Ok(Json(json!({ "success": true })))
}
