//! Caching layer for shortest-path answers.
//!
//! Answers are keyed by the graph generation they were computed on as well as
//! the endpoints, so a query that races a graph swap can never publish a
//! stale path under the new generation. Every swap also drops all entries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StopId;
use crate::pathfinding::ShortestPath;

/// Cache key: (graph generation, from, to).
type PathKey = (u64, StopId, StopId);

/// Cached answer. `None` records that no path exists.
pub type PathEntry = Arc<Option<ShortestPath>>;

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Memoized shortest-path answers.
#[derive(Clone)]
pub struct PathCache {
    paths: MokaCache<PathKey, PathEntry>,
}

impl PathCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { paths }
    }

    /// Get a cached answer.
    pub async fn get(&self, generation: u64, from: StopId, to: StopId) -> Option<PathEntry> {
        self.paths.get(&(generation, from, to)).await
    }

    /// Insert an answer into the cache.
    pub async fn insert(&self, generation: u64, from: StopId, to: StopId, entry: PathEntry) {
        self.paths.insert((generation, from, to), entry).await;
    }

    /// Get cache statistics (for monitoring).
    ///
    /// Moka updates this lazily; call [`PathCache::sync`] first for an exact
    /// count.
    pub fn entry_count(&self) -> u64 {
        self.paths.entry_count()
    }

    /// Run moka's pending maintenance so counts and invalidations settle.
    pub async fn sync(&self) {
        self.paths.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.paths.invalidate_all();
    }
}
