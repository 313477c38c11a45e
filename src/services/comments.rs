use std::sync::Arc;

use crate::{
    db::CommentStore,
    error::{AppError, AppResult},
    models::{Comment, EpisodeId, ShowId},
};

/// Validates and stores a comment on a show, or on one of its episodes
pub async fn add_comment(
    store: Arc<dyn CommentStore>,
    show_id: ShowId,
    episode_id: Option<EpisodeId>,
    text: &str,
) -> AppResult<Comment> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::InvalidInput(
            "Comment text cannot be empty".to_string(),
        ));
    }

    store.add(show_id, episode_id, text).await
}

/// Removes a comment; unknown ids are reported as not found
pub async fn delete_comment(store: Arc<dyn CommentStore>, comment_id: i64) -> AppResult<()> {
    if store.delete(comment_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Comment not found".to_string()))
    }
}
