use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::catalog::loader::SatelliteSet;
use crate::celestrak::Query;

struct MemoEntry {
    set: Arc<SatelliteSet>,
    loaded_at: Instant,
}

/// Loaded satellite sets keyed by query, reused until `ttl` has passed.
///
/// Expired entries are dropped whenever a new set is stored.
pub struct CatalogCache {
    entries: RwLock<HashMap<Query, MemoEntry>>,
    ttl: Duration,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get_or_load<F, Fut, E>(&self, query: &Query, load: F) -> Result<Arc<SatelliteSet>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SatelliteSet, E>>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(query) {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Ok(entry.set.clone());
                }
            }
        }

        let set = Arc::new(load().await?);
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.loaded_at.elapsed() < ttl);
        entries.insert(
            query.clone(),
            MemoEntry {
                set: set.clone(),
                loaded_at: Instant::now(),
            },
        );
        Ok(set)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::celestrak::QueryKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn load_counted(
        cache: &CatalogCache,
        query: &Query,
        calls: &AtomicUsize,
    ) -> Arc<SatelliteSet> {
        let result: Result<_, CatalogError> = cache
            .get_or_load(query, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(SatelliteSet::default())
            })
            .await;
        result.ok().unwrap()
    }

    #[tokio::test]
    async fn test_same_query_is_loaded_once() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let gnss = Query::new(QueryKind::Group, "gnss").unwrap();

        load_counted(&cache, &gnss, &calls).await;
        load_counted(&cache, &gnss, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_changed_parameters_load_again() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        load_counted(&cache, &Query::new(QueryKind::Group, "gnss").unwrap(), &calls).await;
        load_counted(&cache, &Query::new(QueryKind::Name, "gnss").unwrap(), &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_entry_is_reloaded() {
        let cache = CatalogCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);
        let gnss = Query::new(QueryKind::Group, "gnss").unwrap();

        load_counted(&cache, &gnss, &calls).await;
        load_counted(&cache, &gnss, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entries_are_evicted_on_insert() {
        let cache = CatalogCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for value in ["gnss", "weather", "stations", "starlink"] {
            load_counted(&cache, &Query::new(QueryKind::Group, value).unwrap(), &calls).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_fresh_entries_survive_eviction() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for value in ["gnss", "weather", "stations"] {
            load_counted(&cache, &Query::new(QueryKind::Group, value).unwrap(), &calls).await;
        }

        assert_eq!(cache.len().await, 3);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_memoised() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let gnss = Query::new(QueryKind::Group, "gnss").unwrap();

        let result = cache
            .get_or_load(&gnss, || async {
                Err::<SatelliteSet, _>(CatalogError::FileNotFound("gnss.json".into()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.len().await, 0);
    }
}
