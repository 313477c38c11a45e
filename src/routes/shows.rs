use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Show, ShowDetails, ShowId},
    services::shows,
    state::AppState,
};

use super::extract::AppPath;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Search hit as listed by the frontend
#[derive(Debug, Serialize)]
pub struct ShowSummary {
    pub id: ShowId,
    pub name: String,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
}

impl From<Show> for ShowSummary {
    fn from(show: Show) -> Self {
        Self {
            id: show.id,
            name: show.name,
            year: show.year,
            poster_url: show.poster_url,
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<ShowSummary>>> {
    let shows = shows::search_shows(state.catalog.clone(), &params.q).await?;
    Ok(Json(shows.into_iter().map(ShowSummary::from).collect()))
}

pub async fn get_show(
    State(state): State<AppState>,
    AppPath(show_id): AppPath<ShowId>,
) -> AppResult<Json<Show>> {
    state
        .catalog
        .get_by_id(show_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))
}

pub async fn get_show_details(
    State(state): State<AppState>,
    AppPath(show_id): AppPath<ShowId>,
) -> AppResult<Json<ShowDetails>> {
    shows::get_show_details(state.catalog.clone(), show_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Show not found".to_string()))
}
