use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EpisodeId, ShowId};

/// A watched marker for one episode of a show
#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct WatchedEpisode {
    pub show_id: ShowId,
    pub episode_id: EpisodeId,
    pub watched_at: DateTime<Utc>,
}

/// Entry of the watched-episode listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchedStatus {
    pub episode_id: EpisodeId,
}

impl From<&WatchedEpisode> for WatchedStatus {
    fn from(watched: &WatchedEpisode) -> Self {
        Self {
            episode_id: watched.episode_id,
        }
    }
}
