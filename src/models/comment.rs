use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EpisodeId, ShowId};

/// A viewer comment attached to a show, or to one of its episodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub show_id: ShowId,
    pub episode_id: Option<EpisodeId>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_episode_comment(&self) -> bool {
        self.episode_id.is_some()
    }
}

/// Request body for posting a comment
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}
