//! Guard orchestration: outcomes, observers and signal sources
//!
//! Two primitives sit underneath every predicate in [`is`](crate::is) and
//! [`throw_if`](crate::throw_if):
//!
//! - [`check`] returns a condition and reports [`GuardOutcome::Success`] when
//!   it holds, [`GuardOutcome::Failure`] when it does not
//! - [`guard`] fails with a caller-chosen signal when a condition holds, and
//!   reports [`GuardOutcome::Failure`] in that case
//!
//! Both report to an optional [`Observer`] exactly once per call. Observers
//! never change what a guard returns: a panicking callback is contained and
//! the remaining callbacks still run.
//!
//! Signals come from a [`Raise`] source: the built-in [`Violation`], a
//! caller-supplied value or closure, or a type built on demand through
//! [`activate()`].
//!
//! # Example
//!
//! ```rust
//! use tripwire::guard::{check, guard, GuardOutcome, Observer};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let failures = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&failures);
//! let observer = Observer::on_failure(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! assert!(check(2 > 1, Some(&observer)));
//! assert_eq!(failures.load(Ordering::SeqCst), 0);
//!
//! let result = guard(true, || "quota exceeded", Some(&observer));
//! assert_eq!(result, Err("quota exceeded"));
//! assert_eq!(failures.load(Ordering::SeqCst), 1);
//! ```

mod activate;
mod observer;
pub mod raise;
mod violation;

use std::fmt;

pub use activate::{activate, Activate, ActivationError, Args, Constructors};
pub use observer::Observer;
pub use raise::Raise;
pub use violation::Violation;

/// Result of one guard evaluation, as reported to an [`Observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuardOutcome {
    /// The guard passed.
    Success,
    /// The guard tripped.
    Failure,
}

impl GuardOutcome {
    /// Returns `true` for [`GuardOutcome::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` for [`GuardOutcome::Failure`].
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl fmt::Display for GuardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// Report a predicate result and hand it back unchanged.
///
/// `Success` when `condition` holds, `Failure` otherwise.
#[inline]
pub fn check(condition: bool, observer: Option<&Observer>) -> bool {
    if let Some(observer) = observer {
        observer.notify(if condition {
            GuardOutcome::Success
        } else {
            GuardOutcome::Failure
        });
    }
    condition
}

/// Fail with the signal from `raise` when `condition` holds.
///
/// The observer learns `Failure` when the guard trips and `Success` when it
/// passes. It is notified after the signal has been produced, and also when
/// producing it panics.
///
/// # Example
///
/// ```rust
/// use tripwire::guard::guard;
///
/// let balance = 40;
/// assert!(guard(balance < 0, || "overdrawn", None).is_ok());
/// assert_eq!(guard(balance < 50, || "below minimum", None), Err("below minimum"));
/// ```
#[inline]
pub fn guard<E>(
    condition: bool,
    raise: impl FnOnce() -> E,
    observer: Option<&Observer>,
) -> Result<(), E> {
    let _report = Report {
        observer,
        outcome: if condition {
            GuardOutcome::Failure
        } else {
            GuardOutcome::Success
        },
    };

    if condition {
        Err(raise())
    } else {
        Ok(())
    }
}

/// Notifies on drop, so the report survives an unwinding signal factory.
struct Report<'a> {
    observer: Option<&'a Observer>,
    outcome: GuardOutcome,
}

impl Drop for Report<'_> {
    fn drop(&mut self) {
        if let Some(observer) = self.observer {
            observer.notify(self.outcome);
        }
    }
}

/// Error from a guard whose signal is built by [`activate()`].
///
/// Either the guard tripped and the signal was built, or the signal type
/// could not be built from the supplied arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError<S> {
    /// The guard tripped and produced this signal.
    Signal(S),
    /// The guard tripped but its signal could not be built.
    Activation(ActivationError),
}

impl<S> GuardError<S> {
    /// Returns `true` if the signal was built.
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Signal(_))
    }

    /// Returns `true` if building the signal failed.
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Activation(_))
    }

    /// The built signal, if any.
    pub fn signal(&self) -> Option<&S> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::Activation(_) => None,
        }
    }

    /// Extract the built signal, if any.
    pub fn into_signal(self) -> Option<S> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::Activation(_) => None,
        }
    }
}

impl<S> From<ActivationError> for GuardError<S> {
    fn from(error: ActivationError) -> Self {
        Self::Activation(error)
    }
}

impl<S: fmt::Display> fmt::Display for GuardError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal(signal) => write!(f, "{}", signal),
            Self::Activation(error) => write!(f, "guard tripped, but {}", error),
        }
    }
}

impl<S: std::error::Error + 'static> std::error::Error for GuardError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::Activation(error) => Some(error),
        }
    }
}
