//! Compiled path cache
//!
//! Bounded LRU cache from expression text to compiled paths. Compilation
//! is pure, so a cached entry stays valid for every tree.

use super::compiler::CompiledPath;
use crate::error::PathError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, OnceLock};

/// Environment variable overriding the capacity of the global cache
pub const CAPACITY_ENV_VAR: &str = "RUSTYETREE_PATH_CACHE_CAPACITY";

/// Thread-safe LRU cache of compiled paths
pub struct PathCache {
    entries: Mutex<LruCache<String, Arc<CompiledPath>>>,
}

impl PathCache {
    /// Capacity of the global cache unless overridden
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(capacity) => capacity,
        None => NonZeroUsize::MIN,
    };

    /// Create a cache holding at most `capacity` compiled paths
    pub fn new(capacity: NonZeroUsize) -> Self {
        PathCache {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the compiled form of `expr`, compiling it on a miss
    ///
    /// Compile errors are returned and not cached.
    pub fn get_or_compile(&self, expr: &str) -> Result<Arc<CompiledPath>, PathError> {
        if let Some(hit) = self.with_entries(|entries| entries.get(expr).cloned()) {
            return Ok(hit);
        }

        // Compile outside the lock; a concurrent miss on the same text just
        // compiles it twice
        let compiled = Arc::new(CompiledPath::compile(expr)?);
        self.with_entries(|entries| {
            if let Some((evicted, _)) = entries.push(expr.to_string(), Arc::clone(&compiled)) {
                if evicted != expr {
                    log::debug!("path cache evicted '{}'", evicted);
                }
            }
        });
        Ok(compiled)
    }

    /// Number of cached paths
    pub fn len(&self) -> usize {
        self.with_entries(|entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.with_entries(|entries| entries.cap())
    }

    pub fn contains(&self, expr: &str) -> bool {
        self.with_entries(|entries| entries.contains(expr))
    }

    pub fn clear(&self) {
        self.with_entries(|entries| entries.clear());
    }

    /// Run `f` with the entries locked; a poisoned lock is recovered since
    /// the cache holds no invariants beyond the LRU itself
    fn with_entries<R>(&self, f: impl FnOnce(&mut LruCache<String, Arc<CompiledPath>>) -> R) -> R {
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Default for PathCache {
    fn default() -> Self {
        PathCache::new(Self::DEFAULT_CAPACITY)
    }
}

/// Process-wide cache used by the `find*` convenience methods
pub fn global() -> &'static PathCache {
    static GLOBAL: OnceLock<PathCache> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let capacity = capacity_from_env(std::env::var(CAPACITY_ENV_VAR).ok().as_deref());
        log::debug!("global path cache capacity: {}", capacity);
        PathCache::new(capacity)
    })
}

/// Parse a capacity override, falling back to the default
fn capacity_from_env(value: Option<&str>) -> NonZeroUsize {
    match value {
        None => PathCache::DEFAULT_CAPACITY,
        Some(raw) => match raw.trim().parse::<NonZeroUsize>() {
            Ok(capacity) => capacity,
            Err(_) => {
                log::warn!(
                    "ignoring invalid {}='{}', using {}",
                    CAPACITY_ENV_VAR,
                    raw,
                    PathCache::DEFAULT_CAPACITY
                );
                PathCache::DEFAULT_CAPACITY
            }
        },
    }
}
