use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{AddCommentRequest, Comment, EpisodeId, ShowId},
    services::comments,
    state::AppState,
};

use super::extract::{AppJson, AppPath};

pub async fn list_show_comments(
    State(state): State<AppState>,
    AppPath(show_id): AppPath<ShowId>,
) -> AppResult<Json<Vec<Comment>>> {
    Ok(Json(state.comments.list_for_show(show_id).await?))
}

pub async fn add_show_comment(
    State(state): State<AppState>,
    AppPath(show_id): AppPath<ShowId>,
    AppJson(request): AppJson<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let comment = comments::add_comment(state.comments.clone(), show_id, None, &request.text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn add_episode_comment(
    State(state): State<AppState>,
    AppPath((show_id, episode_id)): AppPath<(ShowId, EpisodeId)>,
    AppJson(request): AppJson<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let comment =
        comments::add_comment(state.comments.clone(), show_id, Some(episode_id), &request.text)
            .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_episode_comments(
    State(state): State<AppState>,
    AppPath(episode_id): AppPath<EpisodeId>,
) -> AppResult<Json<Vec<Comment>>> {
    Ok(Json(state.comments.list_for_episode(episode_id).await?))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AppPath(comment_id): AppPath<i64>,
) -> AppResult<Json<Value>> {
    comments::delete_comment(state.comments.clone(), comment_id).await?;
    Ok(Json(json!({ "deleted": true })))
}
