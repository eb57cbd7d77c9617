//! Testing utilities for code that uses guards
//!
//! This module provides an observer that records what it is told, an
//! observer that always panics, assertion macros for guard results, and
//! property-based testing support.
//!
//! # Examples
//!
//! ## Recording outcomes
//!
//! ```rust
//! use tripwire::guard::GuardOutcome;
//! use tripwire::is;
//! use tripwire::testing::Recorder;
//!
//! let recorder = Recorder::new();
//! let observer = recorder.observer();
//!
//! is::greater_than(&3, &1, Some(&observer));
//! is::null_or_empty("full", Some(&observer));
//!
//! assert_eq!(recorder.outcomes(), [GuardOutcome::Success, GuardOutcome::Failure]);
//! assert_eq!(recorder.failures(), 1);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use tripwire::guard::{raise, Violation};
//! use tripwire::{assert_passes, assert_signal, throw_if};
//!
//! assert_passes!(throw_if::less_than(&5, &1, raise::standard(), None));
//! assert_signal!(
//!     throw_if::less_than(&1, &5, raise::standard(), None),
//!     Violation::LessThan { .. }
//! );
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::guard::{GuardOutcome, Observer};

/// An observer sink that remembers every outcome, in order.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    outcomes: Arc<Mutex<Vec<GuardOutcome>>>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that records into this recorder.
    pub fn observer(&self) -> Observer {
        let outcomes = Arc::clone(&self.outcomes);
        Observer::new(move |outcome| {
            outcomes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(outcome)
        })
    }

    /// Every outcome recorded so far.
    pub fn outcomes(&self) -> Vec<GuardOutcome> {
        self.lock().clone()
    }

    /// The most recent outcome.
    pub fn last(&self) -> Option<GuardOutcome> {
        self.lock().last().copied()
    }

    /// Number of recorded successes.
    pub fn successes(&self) -> usize {
        self.lock().iter().filter(|o| o.is_success()).count()
    }

    /// Number of recorded failures.
    pub fn failures(&self) -> usize {
        self.lock().iter().filter(|o| o.is_failure()).count()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GuardOutcome>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An observer whose only callback panics.
///
/// Guards must behave exactly as if it were absent.
///
/// # Example
///
/// ```rust
/// use tripwire::is;
/// use tripwire::testing::panicking_observer;
///
/// let observer = panicking_observer();
/// assert!(is::between(&2, &1, &3, Some(&observer)));
/// ```
pub fn panicking_observer() -> Observer {
    Observer::new(|outcome| panic!("observer panicked on {}", outcome))
}

/// Assert that a guard passed.
///
/// This macro will panic if the guard returned a signal.
///
/// # Example
///
/// ```rust
/// use tripwire::assert_passes;
/// use tripwire::guard::guard;
///
/// assert_passes!(guard(false, || "unused", None));
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($result:expr) => {
        match $result {
            ::core::result::Result::Ok(()) => {}
            ::core::result::Result::Err(signal) => {
                panic!("Expected guard to pass, got signal: {:?}", signal);
            }
        }
    };
}

/// Assert that a guard tripped, optionally matching the signal.
///
/// This macro will panic if the guard passed, or if the signal does not
/// match the given pattern.
///
/// # Example
///
/// ```rust
/// use tripwire::assert_signal;
/// use tripwire::guard::guard;
///
/// assert_signal!(guard(true, || "tripped", None));
/// assert_signal!(guard(true, || 404, None), 400..=499);
/// ```
#[macro_export]
macro_rules! assert_signal {
    ($result:expr) => {
        match $result {
            ::core::result::Result::Err(_) => {}
            ::core::result::Result::Ok(()) => {
                panic!("Expected guard to trip, but it passed");
            }
        }
    };
    ($result:expr, $pattern:pat $(if $cond:expr)? $(,)?) => {
        match $result {
            ::core::result::Result::Err($pattern) $(if $cond)? => {}
            ::core::result::Result::Err(other) => {
                panic!(
                    "Expected signal matching {}, got: {:?}",
                    stringify!($pattern),
                    other
                );
            }
            ::core::result::Result::Ok(()) => {
                panic!("Expected guard to trip, but it passed");
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for GuardOutcome {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop_oneof![Just(GuardOutcome::Success), Just(GuardOutcome::Failure)].boxed()
    }
}
