use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::{CommentStore, WatchedStore},
    error::AppResult,
    models::{Comment, EpisodeId, ShowId, WatchedEpisode},
};

/// In-process comment store, used when no database is wired (tests, local demos)
#[derive(Default)]
pub struct InMemoryCommentStore {
    inner: RwLock<CommentsInner>,
}

#[derive(Default)]
struct CommentsInner {
    next_id: i64,
    comments: HashMap<i64, Comment>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first(&self, filter: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        let inner = self.inner.read().await;
        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|c| filter(*c))
            .cloned()
            .collect();
        // ids break ties between comments created within the same instant
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        comments
    }
}

#[async_trait::async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn add(
        &self,
        show_id: ShowId,
        episode_id: Option<EpisodeId>,
        text: &str,
    ) -> AppResult<Comment> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let comment = Comment {
            id: inner.next_id,
            show_id,
            episode_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        inner.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn list_for_show(&self, show_id: ShowId) -> AppResult<Vec<Comment>> {
        Ok(self
            .newest_first(|c| c.show_id == show_id && !c.is_episode_comment())
            .await)
    }

    async fn list_for_episode(&self, episode_id: EpisodeId) -> AppResult<Vec<Comment>> {
        Ok(self
            .newest_first(|c| c.episode_id == Some(episode_id))
            .await)
    }

    async fn delete(&self, comment_id: i64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.comments.remove(&comment_id).is_some())
    }
}

/// In-process watched store
#[derive(Default)]
pub struct InMemoryWatchedStore {
    watched: RwLock<HashMap<(ShowId, EpisodeId), WatchedEpisode>>,
}

impl InMemoryWatchedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl WatchedStore for InMemoryWatchedStore {
    async fn list(&self, show_id: ShowId) -> AppResult<Vec<WatchedEpisode>> {
        let watched = self.watched.read().await;
        let mut episodes: Vec<WatchedEpisode> = watched
            .values()
            .filter(|w| w.show_id == show_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|w| (w.watched_at, w.episode_id));
        Ok(episodes)
    }

    async fn is_watched(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<bool> {
        Ok(self
            .watched
            .read()
            .await
            .contains_key(&(show_id, episode_id)))
    }

    async fn mark(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<WatchedEpisode> {
        let mut watched = self.watched.write().await;
        let entry = watched
            .entry((show_id, episode_id))
            .or_insert_with(|| WatchedEpisode {
                show_id,
                episode_id,
                watched_at: Utc::now(),
            });
        Ok(entry.clone())
    }

    async fn unmark(&self, show_id: ShowId, episode_id: EpisodeId) -> AppResult<bool> {
        Ok(self
            .watched
            .write()
            .await
            .remove(&(show_id, episode_id))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_comments_listed_newest_first() {
        let store = InMemoryCommentStore::new();
        store.add(1, None, "first").await.unwrap();
        store.add(1, None, "second").await.unwrap();
        store.add(1, None, "third").await.unwrap();

        let texts: Vec<String> = store
            .list_for_show(1)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_show_listing_excludes_episode_comments() {
        let store = InMemoryCommentStore::new();
        store.add(1, None, "about the show").await.unwrap();
        store.add(1, Some(10), "about an episode").await.unwrap();
        store.add(2, None, "another show").await.unwrap();

        let show_comments = store.list_for_show(1).await.unwrap();
        assert_eq!(show_comments.len(), 1);
        assert_eq!(show_comments[0].text, "about the show");

        let episode_comments = store.list_for_episode(10).await.unwrap();
        assert_eq!(episode_comments.len(), 1);
        assert_eq!(episode_comments[0].episode_id, Some(10));
    }

    #[tokio::test]
    async fn test_recent_for_show_limits_and_orders() {
        let store = InMemoryCommentStore::new();
        for text in ["a", "b", "c", "d", "e"] {
            store.add(7, None, text).await.unwrap();
        }

        let recent = store.recent_for_show(7, 3).await.unwrap();
        assert_eq!(recent, vec!["e", "d", "c"]);

        let recent = store.recent_for_episode(99, 3).await.unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let store = InMemoryCommentStore::new();
        let comment = store.add(1, None, "bye").await.unwrap();

        assert!(store.delete(comment.id).await.unwrap());
        assert!(!store.delete(comment.id).await.unwrap());
        assert!(store.list_for_show(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_watched_is_idempotent() {
        let store = InMemoryWatchedStore::new();
        let first = store.mark(1, 10).await.unwrap();
        let second = store.mark(1, 10).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list(1).await.unwrap().len(), 1);
        assert!(store.is_watched(1, 10).await.unwrap());
        assert!(!store.is_watched(2, 10).await.unwrap());
    }

    #[tokio::test]
    async fn test_unmark_watched() {
        let store = InMemoryWatchedStore::new();
        store.mark(1, 10).await.unwrap();

        assert!(store.unmark(1, 10).await.unwrap());
        assert!(!store.unmark(1, 10).await.unwrap());
        assert!(!store.is_watched(1, 10).await.unwrap());
    }
}
