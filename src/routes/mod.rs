use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    state::AppState,
};

pub mod comments;
pub mod extract;
pub mod insight;
pub mod shows;
pub mod watched;

/// Creates the application router with all routes
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            // Request id first, so the trace span can record it
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Shows
        .route("/shows/search", get(shows::search))
        .route("/shows/:show_id", get(shows::get_show))
        .route("/shows/:show_id/details", get(shows::get_show_details))
        // Insights
        .route("/shows/:show_id/insight", get(insight::show_insight))
        .route(
            "/shows/:show_id/episodes/:episode_id/insight",
            get(insight::episode_insight),
        )
        // Comments
        .route(
            "/shows/:show_id/comments",
            get(comments::list_show_comments).post(comments::add_show_comment),
        )
        .route(
            "/shows/:show_id/episodes/:episode_id/comments",
            post(comments::add_episode_comment),
        )
        .route(
            "/episodes/:episode_id/comments",
            get(comments::list_episode_comments),
        )
        .route("/comments/:comment_id", delete(comments::delete_comment))
        // Watched episodes
        .route("/shows/:show_id/watched", get(watched::list_watched))
        .route(
            "/shows/:show_id/episodes/:episode_id/watched",
            get(watched::is_watched)
                .put(watched::mark_watched)
                .delete(watched::unmark_watched),
        )
}

/// CORS policy admitting the configured frontend origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin.parse()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
