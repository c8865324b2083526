//! Cache-aside loader for small reference lists such as picklists.
//!
//! A [`CachedList`] keeps a snapshot of a list loaded from a
//! [`ListSource`]. Population goes through a moka entry with a TTL, so
//! concurrent misses collapse into a single load, and all population is
//! additionally serialized by one async mutex. [`CachedList::refresh`]
//! drops the cached entry, reloads it and notifies subscribers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{debug, info};

use tokenward_core::config::PicklistConfig;
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;

use crate::keys;

/// Longest TTL a list entry may be cached for: one year.
const MAX_LIST_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Backing store a [`CachedList`] loads from on a cache miss.
#[async_trait]
pub trait ListSource<T>: Send + Sync + 'static {
    /// Load the full list, already in display order.
    async fn load(&self) -> AppResult<Vec<T>>;
}

/// A list loaded once, cached with a TTL, and reloadable on demand.
pub struct CachedList<T> {
    key: String,
    cache: Cache<String, Arc<Vec<T>>>,
    source: Arc<dyn ListSource<T>>,
    /// Serializes `initialize` and `refresh`.
    lock: Mutex<()>,
    data: RwLock<Arc<Vec<T>>>,
    version: watch::Sender<u64>,
}

impl<T> std::fmt::Debug for CachedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedList")
            .field("key", &self.key)
            .field("version", &*self.version.borrow())
            .finish()
    }
}

impl<T> CachedList<T>
where
    T: Send + Sync + 'static,
{
    /// Create an empty list named `name` that caches loads for `ttl`.
    pub fn new(name: &str, source: Arc<dyn ListSource<T>>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        let (version, _) = watch::channel(0);

        Self {
            key: keys::list(name),
            cache,
            source,
            lock: Mutex::new(()),
            data: RwLock::new(Arc::new(Vec::new())),
            version,
        }
    }

    /// Create a list using the configured picklist TTL.
    pub fn from_config(
        name: &str,
        source: Arc<dyn ListSource<T>>,
        config: &PicklistConfig,
    ) -> Self {
        let ttl = Duration::from_secs(config.ttl_minutes.saturating_mul(60)).min(MAX_LIST_TTL);
        Self::new(name, source, ttl)
    }

    /// Load the list unless a snapshot is already held.
    pub async fn initialize(&self) -> AppResult<()> {
        if !self.data.read().await.is_empty() {
            return Ok(());
        }

        let _guard = self.lock.lock().await;
        let items = self.fetch_or_populate().await?;
        debug!(key = %self.key, count = items.len(), "List initialized");
        *self.data.write().await = items;
        Ok(())
    }

    /// Drop the cached entry, reload it from the source and notify subscribers.
    pub async fn refresh(&self) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        self.cache.invalidate(&self.key).await;

        let items = self.fetch_or_populate().await?;
        let count = items.len();
        *self.data.write().await = items;
        self.version.send_modify(|version| *version += 1);

        info!(key = %self.key, count, "List refreshed");
        Ok(())
    }

    /// Current snapshot of the list. Empty until the first successful load.
    pub async fn data_source(&self) -> Arc<Vec<T>> {
        Arc::clone(&*self.data.read().await)
    }

    /// Receiver whose value increases after every successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    async fn fetch_or_populate(&self) -> AppResult<Arc<Vec<T>>> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with(self.key.clone(), async move { source.load().await.map(Arc::new) })
            .await
            .map_err(|e: Arc<AppError>| (*e).clone())
    }
}
