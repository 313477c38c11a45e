pub mod comments;
pub mod memory;
pub mod postgres;
pub mod redis;
pub mod watched;

pub use comments::{CommentStore, PgCommentStore};
pub use memory::{InMemoryCommentStore, InMemoryWatchedStore};
pub use postgres::create_pool;
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use redis::CacheWriterHandle;
pub use watched::{PgWatchedStore, WatchedStore};
