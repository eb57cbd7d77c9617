//! Callbacks notified of guard outcomes

use std::fmt;
use std::ops::Add;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::GuardOutcome;

type Callback = Arc<dyn Fn(GuardOutcome) + Send + Sync>;

/// An ordered list of callbacks told about each guard outcome.
///
/// Observers compose with [`Observer::and`] or `+`; callbacks run in the
/// order they were added. A panicking callback is contained: the guard's
/// result is unchanged and later callbacks still run.
///
/// # Example
///
/// ```rust
/// use tripwire::guard::{check, GuardOutcome, Observer};
/// use std::sync::{Arc, Mutex};
///
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&log);
///
/// let observer = Observer::new(move |outcome| sink.lock().unwrap().push(outcome))
///     + Observer::on_failure(|| eprintln!("guard failed"));
///
/// check(false, Some(&observer));
/// assert_eq!(*log.lock().unwrap(), [GuardOutcome::Failure]);
/// ```
#[derive(Clone, Default)]
pub struct Observer {
    callbacks: Vec<Callback>,
}

impl Observer {
    /// An observer told about every outcome.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(GuardOutcome) + Send + Sync + 'static,
    {
        Self {
            callbacks: vec![Arc::new(callback)],
        }
    }

    /// An observer told only about successes.
    pub fn on_success<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move |outcome| {
            if outcome.is_success() {
                callback();
            }
        })
    }

    /// An observer told only about failures.
    pub fn on_failure<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move |outcome| {
            if outcome.is_failure() {
                callback();
            }
        })
    }

    /// Run `other`'s callbacks after this observer's.
    pub fn and(mut self, other: Observer) -> Self {
        self.callbacks.extend(other.callbacks);
        self
    }

    /// Number of callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` if there are no callbacks.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Tell every callback about `outcome`, containing any panic.
    pub fn notify(&self, outcome: GuardOutcome) {
        for callback in &self.callbacks {
            let result = panic::catch_unwind(AssertUnwindSafe(|| callback(outcome)));
            if result.is_err() {
                #[cfg(feature = "tracing")]
                tracing::warn!(%outcome, "guard observer panicked, ignoring");
            }
        }
    }
}

impl Add for Observer {
    type Output = Observer;

    fn add(self, other: Observer) -> Observer {
        self.and(other)
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
