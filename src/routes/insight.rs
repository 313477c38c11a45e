use axum::{
    extract::State,
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{EpisodeId, InsightResult, ShowId},
    state::AppState,
};

use super::extract::AppPath;

/// Handler for show insight endpoint
pub async fn show_insight(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppPath(show_id): AppPath<ShowId>,
) -> AppResult<Json<InsightResult>> {
    tracing::info!(request_id = %request_id, show_id = show_id, "Generating show insight");

    state
        .insights
        .get_show_insight(show_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))
}

/// Handler for episode insight endpoint
pub async fn episode_insight(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppPath((show_id, episode_id)): AppPath<(ShowId, EpisodeId)>,
) -> AppResult<Json<InsightResult>> {
    tracing::info!(
        request_id = %request_id,
        show_id = show_id,
        episode_id = episode_id,
        "Generating episode insight"
    );

    state
        .insights
        .get_episode_insight(show_id, episode_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Show or episode not found".to_string()))
}
