//! Bounded, process-wide store of compiled evaluators

use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::compile::Check;
use super::{Evaluator, Path, PathKey};
use crate::inspect::Inspect;

/// Number of distinct paths held before the cache starts over.
pub const DEFAULT_CAPACITY: usize = 1024;

static GLOBAL: LazyLock<EvaluatorCache> = LazyLock::new(EvaluatorCache::new);

/// Compiled evaluators keyed by root type and path text.
///
/// Lookups share a read lock. A miss compiles outside any lock, then inserts;
/// if two threads race on the same path both compile and the last insert
/// wins, which is harmless since compilation is deterministic.
///
/// When an insert would push the cache past its capacity, every entry is
/// dropped first. Evicted paths are simply recompiled on next use.
///
/// # Example
///
/// ```rust
/// use tripwire::inspect::{Field, Inspect, Shape};
/// use tripwire::selector::{EvaluatorCache, Path};
///
/// struct Job {
///     owner: String,
/// }
///
/// impl Inspect for Job {
///     fn shape() -> Shape {
///         Shape::record::<Self>(vec![Field::new("owner", |j: &Job| &j.owner)])
///     }
/// }
///
/// let cache = EvaluatorCache::with_capacity(8);
/// let owner = Path::<Job>::parse("owner").unwrap();
///
/// assert!(cache.is_empty_at(&Job { owner: String::new() }, &owner));
/// assert!(!cache.is_empty_at(&Job { owner: "ops".into() }, &owner));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct EvaluatorCache {
    capacity: usize,
    entries: RwLock<HashMap<PathKey, Check>>,
}

impl EvaluatorCache {
    /// A cache holding up to [`DEFAULT_CAPACITY`] paths.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A cache holding up to `capacity` paths (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cache used by [`is_empty_at`](super::is_empty_at).
    pub fn global() -> &'static EvaluatorCache {
        &GLOBAL
    }

    /// Maximum number of cached paths.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached evaluator.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// The evaluator for `path`, compiled on first use.
    pub fn compile<T: Inspect>(&self, path: &Path<T>) -> Evaluator<T> {
        if let Some(check) = self.read().get(path.key()) {
            return Evaluator::new(Check::clone(check));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            root = std::any::type_name::<T>(),
            path = path.as_str(),
            "compiling selector"
        );

        let check = path.build();

        let mut entries = self.write();
        if entries.len() >= self.capacity && !entries.contains_key(path.key()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                capacity = self.capacity,
                "evaluator cache full, starting over"
            );
            entries.clear();
        }
        entries.insert(path.key().clone(), Check::clone(&check));

        Evaluator::new(check)
    }

    /// Classify the member selected by `path`; an absent `value` is empty.
    pub fn is_empty_at<'a, T: Inspect>(
        &self,
        value: impl Into<Option<&'a T>>,
        path: &Path<T>,
    ) -> bool {
        match value.into() {
            None => true,
            Some(value) => self.compile(path).evaluate(value),
        }
    }

    // Entries are plain compiled checks, so a panic elsewhere never leaves
    // them half-written.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathKey, Check>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathKey, Check>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EvaluatorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EvaluatorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatorCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
