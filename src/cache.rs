use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use tokio::{sync::RwLock, time::Instant};

/// Key the translation payload is remembered under.
///
/// It does not include the locale: whichever locale fills the entry first is
/// served to every request until it expires.
pub const TRANSLATIONS_KEY: &str = "translations";

struct Entry {
    value: Arc<String>,
    expires_at: Instant,
}

/// In-process cache of raw payloads with a per-entry time to live.
#[derive(Clone, Default)]
pub struct TranslationCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Arc<String>> {
        let entries = self.entries.read().await;

        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Returns the live entry for `key` or stores what `loader` produces.
    /// A failing loader leaves the cache untouched.
    pub async fn remember<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> Result<Arc<String>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let value = Arc::new(loader().await?);

        self.entries.write().await.insert(
            key.to_owned(),
            Entry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            },
        );

        tracing::debug!(key, ttl_secs = ttl.as_secs(), "cache entry stored");

        Ok(value)
    }

    pub async fn forget(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn remember_until_expired() {
        let cache = TranslationCache::new();
        let ttl = Duration::from_secs(30);

        let first = cache
            .remember("k", ttl, || async { Ok::<_, ()>("v1".to_owned()) })
            .await
            .unwrap();
        let second = cache
            .remember("k", ttl, || async { Ok::<_, ()>("v2".to_owned()) })
            .await
            .unwrap();

        assert_eq!(*first, "v1");
        assert_eq!(*second, "v1");

        tokio::time::advance(Duration::from_secs(31)).await;

        let third = cache
            .remember("k", ttl, || async { Ok::<_, ()>("v3".to_owned()) })
            .await
            .unwrap();
        assert_eq!(*third, "v3");
    }

    #[tokio::test]
    async fn failed_loader_is_not_cached() {
        let cache = TranslationCache::new();
        let ttl = Duration::from_secs(30);

        let res = cache
            .remember("k", ttl, || async { Err::<String, _>("boom") })
            .await;
        assert_eq!(res, Err("boom"));
        assert!(cache.get("k").await.is_none());

        cache
            .remember("k", ttl, || async { Ok::<_, ()>("ok".to_owned()) })
            .await
            .unwrap();
        cache.forget("k").await;
        assert!(cache.get("k").await.is_none());
    }
}
