/// Read-through caching over an optional [`Cache`](crate::db::Cache).
///
/// With no cache configured the block is simply awaited. On a hit the cached
/// value is returned; on a miss (or when the cache read fails) the block is
/// awaited, its value queued for a background write and returned.
///
/// # Arguments
/// * `$cache`: `Option<&Cache>`
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) to read and write
/// * `$ttl`: time-to-live for the written value, in seconds
/// * `$block`: future producing an `AppResult` of the value
///
/// # Example
/// ```rust,ignore
/// let show = cached!(self.cache.as_ref(), CacheKey::Show(id), SHOW_CACHE_TTL, async move {
///     fetch_show(id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache {
            Some(cache) => match cache.get_from_cache(&$key).await {
                Ok(Some(cached)) => Ok(cached),
                lookup => {
                    if let Err(e) = lookup {
                        tracing::warn!(error = %e, key = %$key, "Cache read failed, falling through");
                    }
                    let fetched: $crate::error::AppResult<_> = $block.await;
                    let value = fetched?;
                    cache.set_in_background(&$key, &value, $ttl);
                    Ok(value)
                }
            },
            None => $block.await,
        }
    }};
}
