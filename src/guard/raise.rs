//! Where a tripped guard gets its signal from
//!
//! Every [`throw_if`](crate::throw_if) guard takes a [`Raise`] source:
//!
//! - [`standard()`] raises the built-in [`Violation`]
//! - [`with`] calls a closure, and [`instance`] hands over a ready value
//! - [`activate`] builds an [`Activate`] type from runtime arguments
//!
//! Sources are consumed lazily: nothing is built unless the guard trips.
//!
//! # Example
//!
//! ```rust
//! use tripwire::guard::raise;
//! use tripwire::guard::Violation;
//! use tripwire::throw_if;
//!
//! let standard = throw_if::greater_than(&12, &10, raise::standard(), None);
//! assert!(matches!(standard, Err(Violation::GreaterThan { .. })));
//!
//! let custom = throw_if::greater_than(&12, &10, raise::with(|| "too many"), None);
//! assert_eq!(custom, Err("too many"));
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::{Activate, Args, GuardError, Violation};

/// A lazily consumed signal source.
pub trait Raise {
    /// The signal type produced.
    type Error;

    /// Produce the signal; `standard` builds the built-in [`Violation`] for
    /// the guard that tripped.
    fn raise(self, standard: impl FnOnce() -> Violation) -> Self::Error;
}

/// Raises the built-in [`Violation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

/// Raises whatever the wrapped closure returns.
#[derive(Clone, Copy)]
pub struct With<F>(F);

/// Raises a value supplied up front.
#[derive(Debug, Clone)]
pub struct Instance<E>(E);

/// Raises an `S` built by [`activate`](fn@super::activate).
pub struct Activated<S> {
    args: Option<Args>,
    _signal: PhantomData<fn() -> S>,
}

/// Source for the built-in [`Violation`].
pub fn standard() -> Standard {
    Standard
}

/// Source calling `make` when the guard trips.
pub fn with<E, F: FnOnce() -> E>(make: F) -> With<F> {
    With(make)
}

/// Source returning `signal` when the guard trips.
pub fn instance<E>(signal: E) -> Instance<E> {
    Instance(signal)
}

/// Source activating `S` from `args` when the guard trips.
///
/// # Example
///
/// ```rust
/// use tripwire::args;
/// use tripwire::guard::{raise, Activate, Constructors, GuardError};
/// use tripwire::throw_if;
///
/// #[derive(Debug, PartialEq)]
/// struct Overdrawn(String);
///
/// impl Activate for Overdrawn {
///     fn constructors() -> Constructors<Self> {
///         Constructors::new().unary(Overdrawn)
///     }
/// }
///
/// let source = raise::activate::<Overdrawn>(Some(args![String::from("acct-7")]));
/// let result = throw_if::less_than(&-5, &0, source, None);
/// assert_eq!(result, Err(GuardError::Signal(Overdrawn("acct-7".into()))));
///
/// // no matching constructor: the activation failure is surfaced, not hidden
/// let result = throw_if::less_than(&-5, &0, raise::activate::<Overdrawn>(None), None);
/// assert!(matches!(result, Err(GuardError::Activation(_))));
/// ```
pub fn activate<S: Activate>(args: Option<Args>) -> Activated<S> {
    Activated {
        args,
        _signal: PhantomData,
    }
}

impl Raise for Standard {
    type Error = Violation;

    fn raise(self, standard: impl FnOnce() -> Violation) -> Violation {
        standard()
    }
}

impl<E, F: FnOnce() -> E> Raise for With<F> {
    type Error = E;

    fn raise(self, _standard: impl FnOnce() -> Violation) -> E {
        (self.0)()
    }
}

impl<E> Raise for Instance<E> {
    type Error = E;

    fn raise(self, _standard: impl FnOnce() -> Violation) -> E {
        self.0
    }
}

impl<S: Activate> Raise for Activated<S> {
    type Error = GuardError<S>;

    fn raise(self, _standard: impl FnOnce() -> Violation) -> GuardError<S> {
        match super::activate::<S>(self.args) {
            Ok(signal) => GuardError::Signal(signal),
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%error, "guard signal could not be activated");
                GuardError::Activation(error)
            }
        }
    }
}

impl<F> fmt::Debug for With<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("With").finish_non_exhaustive()
    }
}

impl<S> fmt::Debug for Activated<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activated")
            .field("signal", &std::any::type_name::<S>())
            .field("args", &self.args)
            .finish()
    }
}
