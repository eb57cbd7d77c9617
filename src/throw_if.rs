//! Guards that fail when a precondition is violated
//!
//! Each guard evaluates the same predicate as its [`is`](crate::is)
//! counterpart and fails with a signal from its [`Raise`] source when the
//! predicate holds. The observer hears about each call exactly once:
//! `Failure` when the guard trips, `Success` when it passes.
//!
//! # Example
//!
//! ```rust
//! use tripwire::guard::{raise, Violation};
//! use tripwire::throw_if;
//!
//! fn reserve(seats: u32, available: u32) -> Result<u32, Violation> {
//!     throw_if::greater_than(&seats, &available, raise::standard(), None)?;
//!     Ok(available - seats)
//! }
//!
//! assert_eq!(reserve(2, 5), Ok(3));
//! assert_eq!(
//!     reserve(6, 5).unwrap_err().to_string(),
//!     "6 is greater than 5"
//! );
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::empty::Emptiness;
use crate::guard::{guard, Observer, Raise, Violation};
use crate::inspect::Inspect;
use crate::is;
use crate::selector::Path;

/// Fail when `value` is absent or empty.
pub fn null_or_empty<'a, T, S>(
    value: impl Into<Option<&'a T>>,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    T: Emptiness + ?Sized + 'a,
    S: Raise,
{
    let tripped = is::null_or_empty(value, None);
    guard(
        tripped,
        || raise.raise(Violation::null_or_empty::<T>),
        observer,
    )
}

/// Fail when the member of `value` selected by `path` is absent or empty.
///
/// # Example
///
/// ```rust
/// use tripwire::guard::{raise, Violation};
/// use tripwire::inspect::{Field, Inspect, Shape};
/// use tripwire::selector::Path;
/// use tripwire::throw_if;
///
/// struct Invoice {
///     number: String,
/// }
///
/// impl Inspect for Invoice {
///     fn shape() -> Shape {
///         Shape::record::<Self>(vec![Field::new("number", |i: &Invoice| &i.number)])
///     }
/// }
///
/// let number = Path::<Invoice>::parse("number").unwrap();
/// let draft = Invoice { number: String::new() };
///
/// let result = throw_if::null_or_empty_at(&draft, &number, raise::standard(), None);
/// assert!(matches!(result, Err(Violation::NullOrEmpty { .. })));
/// ```
pub fn null_or_empty_at<'a, T, S>(
    value: impl Into<Option<&'a T>>,
    path: &Path<T>,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    T: Inspect,
    S: Raise,
{
    let tripped = is::null_or_empty_at(value, path, None);
    guard(
        tripped,
        || raise.raise(|| Violation::NullOrEmpty {
            type_name: path.leaf().type_name(),
        }),
        observer,
    )
}

/// Fail when `left > right`.
pub fn greater_than<L, R, S>(
    left: &L,
    right: &R,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
    S: Raise,
{
    let tripped = is::greater_than(left, right, None);
    guard(
        tripped,
        || raise.raise(|| Violation::greater_than(left, right)),
        observer,
    )
}

/// Fail when `left > right` under `compare`.
pub fn greater_than_by<L, R, F, S>(
    left: &L,
    right: &R,
    compare: F,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: Debug + ?Sized,
    R: Debug + ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
    S: Raise,
{
    let tripped = is::greater_than_by(left, right, compare, None);
    guard(
        tripped,
        || raise.raise(|| Violation::greater_than(left, right)),
        observer,
    )
}

/// Fail when `left >= right`.
pub fn greater_than_or_equal<L, R, S>(
    left: &L,
    right: &R,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
    S: Raise,
{
    let tripped = is::greater_than_or_equal(left, right, None);
    guard(
        tripped,
        || raise.raise(|| Violation::greater_than_or_equal(left, right)),
        observer,
    )
}

/// Fail when `left >= right` under `compare`.
pub fn greater_than_or_equal_by<L, R, F, S>(
    left: &L,
    right: &R,
    compare: F,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: Debug + ?Sized,
    R: Debug + ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
    S: Raise,
{
    let tripped = is::greater_than_or_equal_by(left, right, compare, None);
    guard(
        tripped,
        || raise.raise(|| Violation::greater_than_or_equal(left, right)),
        observer,
    )
}

/// Fail when `left < right`.
pub fn less_than<L, R, S>(
    left: &L,
    right: &R,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
    S: Raise,
{
    let tripped = is::less_than(left, right, None);
    guard(
        tripped,
        || raise.raise(|| Violation::less_than(left, right)),
        observer,
    )
}

/// Fail when `left < right` under `compare`.
pub fn less_than_by<L, R, F, S>(
    left: &L,
    right: &R,
    compare: F,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: Debug + ?Sized,
    R: Debug + ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
    S: Raise,
{
    let tripped = is::less_than_by(left, right, compare, None);
    guard(
        tripped,
        || raise.raise(|| Violation::less_than(left, right)),
        observer,
    )
}

/// Fail when `left <= right`.
pub fn less_than_or_equal<L, R, S>(
    left: &L,
    right: &R,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
    S: Raise,
{
    let tripped = is::less_than_or_equal(left, right, None);
    guard(
        tripped,
        || raise.raise(|| Violation::less_than_or_equal(left, right)),
        observer,
    )
}

/// Fail when `left <= right` under `compare`.
pub fn less_than_or_equal_by<L, R, F, S>(
    left: &L,
    right: &R,
    compare: F,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    L: Debug + ?Sized,
    R: Debug + ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
    S: Raise,
{
    let tripped = is::less_than_or_equal_by(left, right, compare, None);
    guard(
        tripped,
        || raise.raise(|| Violation::less_than_or_equal(left, right)),
        observer,
    )
}

/// Fail when `min <= value <= max`.
pub fn between<T, B, S>(
    value: &T,
    min: &B,
    max: &B,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    T: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
    S: Raise,
{
    let tripped = is::between(value, min, max, None);
    guard(
        tripped,
        || raise.raise(|| Violation::between(value, min, max)),
        observer,
    )
}

/// Fail when `min <= value <= max` under `compare`.
pub fn between_by<T, B, F, S>(
    value: &T,
    min: &B,
    max: &B,
    compare: F,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    T: Debug + ?Sized,
    B: Debug + ?Sized,
    F: Fn(&T, &B) -> Ordering,
    S: Raise,
{
    let tripped = is::between_by(value, min, max, compare, None);
    guard(
        tripped,
        || raise.raise(|| Violation::between(value, min, max)),
        observer,
    )
}

/// Fail when some item satisfies `predicate`.
pub fn any<I, P, S>(
    items: I,
    predicate: P,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    I: IntoIterator,
    P: FnMut(I::Item) -> bool,
    S: Raise,
{
    let tripped = is::any(items, predicate, None);
    guard(tripped, || raise.raise(|| Violation::Any), observer)
}

/// Fail when every item satisfies `predicate`, including when there are none.
pub fn all<I, P, S>(
    items: I,
    predicate: P,
    raise: S,
    observer: Option<&Observer>,
) -> Result<(), S::Error>
where
    I: IntoIterator,
    P: FnMut(I::Item) -> bool,
    S: Raise,
{
    let tripped = is::all(items, predicate, None);
    guard(tripped, || raise.raise(|| Violation::All), observer)
}
