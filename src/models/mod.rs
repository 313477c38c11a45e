mod comment;
mod insight;
mod show;
mod watched;

pub use comment::{AddCommentRequest, Comment};
pub use insight::{InsightOrigin, InsightResult};
pub use show::{
    ApiEpisode, ApiImage, ApiSearchResult, ApiShow, Episode, EpisodeId, Season, Show,
    ShowDetails, ShowId,
};
pub use watched::{WatchedEpisode, WatchedStatus};
