//! Time-to-live cache around a provider refresh function.

use std::future::Future;
use std::time::Duration;

use futures::FutureExt as _;
use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::ProviderError;

type RefreshFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ProviderError>> + Send + Sync>;

struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

/// Caches the last successful value of a provider feed.
///
/// - Fresh values (younger than the TTL) are served without calling the
///   refresh function.
/// - Stale or missing values trigger one refresh, bounded by the timeout.
/// - If the refresh fails and a stale value exists, the stale value is
///   served and a warning is logged. Otherwise the error is returned.
///
/// Concurrent callers are serialised on an async mutex, so at most one
/// refresh is in flight per cache.
pub struct CachedProvider<T> {
    name: String,
    ttl: Duration,
    timeout: Duration,
    refresh: RefreshFn<T>,
    entry: Mutex<Option<Entry<T>>>,
}

impl<T: Clone + Send + Sync + 'static> CachedProvider<T> {
    /// Wraps `refresh` with a TTL and a per-call timeout.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        ttl: Duration,
        timeout: Duration,
        refresh: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ProviderError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            ttl,
            timeout,
            refresh: Box::new(move || refresh().boxed()),
            entry: Mutex::new(None),
        }
    }

    /// The feed name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cached value, refreshing it first if stale.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the refresh fails or times out and no
    /// previous value is cached.
    pub async fn get(&self) -> Result<T, ProviderError> {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            log::debug!("{}: serving cached value", self.name);
            return Ok(cached.value.clone());
        }

        let result = match tokio::time::timeout(self.timeout, (self.refresh)()).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                provider: self.name.clone(),
                timeout: self.timeout,
            }),
        };

        match result {
            Ok(value) => {
                log::debug!("{}: refreshed", self.name);
                *entry = Some(Entry {
                    value: value.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(value)
            }
            Err(e) => match entry.as_ref() {
                Some(stale) => {
                    log::warn!(
                        "{}: refresh failed ({e}), serving value from {:?} ago",
                        self.name,
                        stale.fetched_at.elapsed()
                    );
                    Ok(stale.value.clone())
                }
                None => Err(e),
            },
        }
    }

    /// Drops the cached value so the next [`get`](Self::get) refreshes.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}

impl<T> std::fmt::Debug for CachedProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedProvider")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    const TTL: Duration = Duration::from_secs(60);
    const TIMEOUT: Duration = Duration::from_secs(5);

    /// A provider counting its calls, failing while `fail` is set.
    fn counting(calls: Arc<AtomicUsize>, fail: Arc<AtomicBool>) -> CachedProvider<usize> {
        CachedProvider::new("counter", TTL, TIMEOUT, move || {
            let calls = Arc::clone(&calls);
            let fail = Arc::clone(&fail);
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if fail.load(Ordering::SeqCst) {
                    Err(ProviderError::Unavailable {
                        provider: "counter".to_string(),
                        reason: "offline".to_string(),
                    })
                } else {
                    Ok(n)
                }
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn serves_fresh_value_without_refreshing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = counting(Arc::clone(&calls), Arc::new(AtomicBool::new(false)));

        assert_eq!(cache.get().await.unwrap(), 1);
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.get().await.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_after_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = counting(Arc::clone(&calls), Arc::new(AtomicBool::new(false)));

        assert_eq!(cache.get().await.unwrap(), 1);
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert_eq!(cache.get().await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn serves_stale_value_when_refresh_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fail = Arc::new(AtomicBool::new(false));
        let cache = counting(Arc::clone(&calls), Arc::clone(&fail));

        assert_eq!(cache.get().await.unwrap(), 1);
        fail.store(true, Ordering::SeqCst);
        tokio::time::advance(TTL * 2).await;

        assert_eq!(cache.get().await.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_error_when_nothing_cached() {
        let cache = counting(Arc::new(AtomicUsize::new(0)), Arc::new(AtomicBool::new(true)));
        assert!(matches!(
            cache.get().await,
            Err(ProviderError::Unavailable { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_refresh_times_out() {
        let cache: CachedProvider<u8> = CachedProvider::new("slow", TTL, TIMEOUT, || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        });
        assert!(matches!(
            cache.get().await,
            Err(ProviderError::Timeout { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = counting(Arc::clone(&calls), Arc::new(AtomicBool::new(false)));

        cache.get().await.unwrap();
        cache.invalidate().await;
        assert_eq!(cache.get().await.unwrap(), 2);
    }
}
