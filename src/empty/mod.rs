//! Type-directed emptiness classification
//!
//! "Empty" is a per-type notion of *no meaningful content*, not merely
//! "equals the zero value". The [`Emptiness`] trait carries that notion and
//! its implementations form the dispatch table:
//!
//! 1. absence (`None`) is always empty
//! 2. strings are empty when their length is zero
//! 3. every integer and float width is empty when it is zero
//! 4. `bool` is empty when `false`
//! 5. [`uuid::Uuid`] is empty when nil
//! 6. temporal values are empty at their epoch (see *Temporal values* below)
//! 7. counted collections are empty when their count is zero, iteration-only
//!    collections when the first advance fails ([`Iterable`], [`first_advance_fails`])
//! 8. types that opt in with [`impl_default_emptiness!`] are empty when equal to
//!    their `Default`
//! 9. everything else is *not* empty (the trait's default body)
//!
//! # Example
//!
//! ```rust
//! use tripwire::empty::{is_empty, Emptiness};
//!
//! assert!(is_empty(""));
//! assert!(!is_empty("x"));
//! assert!(is_empty(&Vec::<i32>::new()));
//! assert!(!is_empty(&vec![1, 2]));
//! assert!(is_empty(&None::<String>));
//! assert!(is_empty(&0u8));
//!
//! // Opaque types are never empty
//! struct Handle;
//! impl Emptiness for Handle {}
//! assert!(!is_empty(&Handle));
//! ```
//!
//! # Temporal values
//!
//! Point-in-time types are empty at the Unix epoch (their zero-initialised
//! default), time-of-day types at midnight, and durations at zero. Time-zone
//! qualified values compare their local clock reading, so
//! `1970-01-01T00:00:00+01:00` is empty while `1970-01-01T01:00:00+01:00`,
//! the epoch instant itself, is not.

mod collection;
mod scalar;
mod temporal;

pub use collection::{first_advance_fails, Iterable};

/// Classification of a value as empty or not.
///
/// The default body returns `false`, so `impl Emptiness for MyType {}` declares
/// a type whose values are never empty.
pub trait Emptiness {
    /// Returns `true` when this value has no meaningful content.
    fn is_empty_value(&self) -> bool {
        false
    }
}

/// Classify `value`.
///
/// Total over every type implementing [`Emptiness`]; never panics.
///
/// # Example
///
/// ```rust
/// use tripwire::empty::is_empty;
///
/// assert!(is_empty(&0.0f64));
/// assert!(!is_empty(&f64::NAN));
/// assert!(is_empty(&Some(String::new())));
/// ```
#[inline]
pub fn is_empty<T: Emptiness + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

/// Returns `true` when `value` equals the zero-initialised default of its type.
///
/// # Example
///
/// ```rust
/// use tripwire::empty::is_default;
///
/// #[derive(Default, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// assert!(is_default(&Point { x: 0, y: 0 }));
/// assert!(!is_default(&Point { x: 1, y: 0 }));
/// ```
#[inline]
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Implement [`Emptiness`] and [`Inspect`](crate::inspect::Inspect) for value
/// types that are empty when equal to their `Default`.
///
/// # Example
///
/// ```rust
/// use tripwire::{impl_default_emptiness, empty::is_empty};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Money { cents: i64, currency: [u8; 3] }
///
/// impl_default_emptiness!(Money);
///
/// assert!(is_empty(&Money::default()));
/// assert!(!is_empty(&Money { cents: 5, currency: *b"EUR" }));
/// ```
#[macro_export]
macro_rules! impl_default_emptiness {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::empty::Emptiness for $ty {
                #[inline]
                fn is_empty_value(&self) -> bool {
                    $crate::empty::is_default(self)
                }
            }

            impl $crate::inspect::Inspect for $ty {
                fn shape() -> $crate::inspect::Shape {
                    $crate::inspect::Shape::leaf::<Self>($crate::inspect::LeafClass::Default)
                }
            }
        )+
    };
}
