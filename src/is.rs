//! Boolean precondition checks
//!
//! Every predicate returns its answer and reports it to the optional
//! [`Observer`] through [`check`]: `Success` when the predicate holds,
//! `Failure` when it does not.
//!
//! Comparisons use the operands' own ordering ([`PartialOrd`]) or, in the
//! `_by` variants, an explicit ordering function such as
//! [`compare::ignore_ascii_case`].
//!
//! # Example
//!
//! ```rust
//! use tripwire::is;
//! use tripwire::is::compare;
//!
//! assert!(is::null_or_empty(None::<&String>, None));
//! assert!(is::null_or_empty(&Vec::<u8>::new(), None));
//! assert!(!is::null_or_empty("text", None));
//!
//! assert!(is::between(&5, &1, &10, None));
//! assert!(is::less_than_by("apple", "Banana", compare::ignore_ascii_case, None));
//! assert!(is::any([1, 5, 9], |n| n > 8, None));
//! ```

use std::cmp::Ordering;

use crate::empty::{self, Emptiness};
use crate::guard::{check, Observer};
use crate::inspect::Inspect;
use crate::selector::{self, Path};

/// Ready-made ordering functions for the `_by` predicates.
pub mod compare {
    use std::cmp::Ordering;

    /// Compare two strings ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tripwire::is::compare::ignore_ascii_case;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(ignore_ascii_case("Apple", "aPPLE"), Ordering::Equal);
    /// assert_eq!(ignore_ascii_case("a", "B"), Ordering::Less);
    /// ```
    pub fn ignore_ascii_case<L, R>(left: &L, right: &R) -> Ordering
    where
        L: AsRef<str> + ?Sized,
        R: AsRef<str> + ?Sized,
    {
        let left = left.as_ref().bytes().map(|b| b.to_ascii_lowercase());
        let right = right.as_ref().bytes().map(|b| b.to_ascii_lowercase());
        left.cmp(right)
    }
}

/// `true` when `value` is absent or empty.
pub fn null_or_empty<'a, T>(value: impl Into<Option<&'a T>>, observer: Option<&Observer>) -> bool
where
    T: Emptiness + ?Sized + 'a,
{
    check(value.into().is_none_or(empty::is_empty), observer)
}

/// `true` when the member of `value` selected by `path` is absent or empty.
pub fn null_or_empty_at<'a, T: Inspect>(
    value: impl Into<Option<&'a T>>,
    path: &Path<T>,
    observer: Option<&Observer>,
) -> bool {
    check(selector::is_empty_at(value, path), observer)
}

/// `left > right`.
pub fn greater_than<L, R>(left: &L, right: &R, observer: Option<&Observer>) -> bool
where
    L: PartialOrd<R> + ?Sized,
    R: ?Sized,
{
    check(left > right, observer)
}

/// `left > right` under `compare`.
pub fn greater_than_by<L, R, F>(left: &L, right: &R, compare: F, observer: Option<&Observer>) -> bool
where
    L: ?Sized,
    R: ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
{
    check(compare(left, right).is_gt(), observer)
}

/// `left >= right`.
pub fn greater_than_or_equal<L, R>(left: &L, right: &R, observer: Option<&Observer>) -> bool
where
    L: PartialOrd<R> + ?Sized,
    R: ?Sized,
{
    check(left >= right, observer)
}

/// `left >= right` under `compare`.
pub fn greater_than_or_equal_by<L, R, F>(
    left: &L,
    right: &R,
    compare: F,
    observer: Option<&Observer>,
) -> bool
where
    L: ?Sized,
    R: ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
{
    check(compare(left, right).is_ge(), observer)
}

/// `left < right`.
pub fn less_than<L, R>(left: &L, right: &R, observer: Option<&Observer>) -> bool
where
    L: PartialOrd<R> + ?Sized,
    R: ?Sized,
{
    check(left < right, observer)
}

/// `left < right` under `compare`.
pub fn less_than_by<L, R, F>(left: &L, right: &R, compare: F, observer: Option<&Observer>) -> bool
where
    L: ?Sized,
    R: ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
{
    check(compare(left, right).is_lt(), observer)
}

/// `left <= right`.
pub fn less_than_or_equal<L, R>(left: &L, right: &R, observer: Option<&Observer>) -> bool
where
    L: PartialOrd<R> + ?Sized,
    R: ?Sized,
{
    check(left <= right, observer)
}

/// `left <= right` under `compare`.
pub fn less_than_or_equal_by<L, R, F>(
    left: &L,
    right: &R,
    compare: F,
    observer: Option<&Observer>,
) -> bool
where
    L: ?Sized,
    R: ?Sized,
    F: FnOnce(&L, &R) -> Ordering,
{
    check(compare(left, right).is_le(), observer)
}

/// `min <= value <= max`, inclusive on both ends.
pub fn between<T, B>(value: &T, min: &B, max: &B, observer: Option<&Observer>) -> bool
where
    T: PartialOrd<B> + ?Sized,
    B: ?Sized,
{
    check(value >= min && value <= max, observer)
}

/// `min <= value <= max` under `compare`, inclusive on both ends.
pub fn between_by<T, B, F>(
    value: &T,
    min: &B,
    max: &B,
    compare: F,
    observer: Option<&Observer>,
) -> bool
where
    T: ?Sized,
    B: ?Sized,
    F: Fn(&T, &B) -> Ordering,
{
    check(
        compare(value, min).is_ge() && compare(value, max).is_le(),
        observer,
    )
}

/// `true` when some item satisfies `predicate`; stops at the first match.
pub fn any<I, P>(items: I, predicate: P, observer: Option<&Observer>) -> bool
where
    I: IntoIterator,
    P: FnMut(I::Item) -> bool,
{
    check(items.into_iter().any(predicate), observer)
}

/// `true` when every item satisfies `predicate`, including when there are
/// none; stops at the first miss.
pub fn all<I, P>(items: I, predicate: P, observer: Option<&Observer>) -> bool
where
    I: IntoIterator,
    P: FnMut(I::Item) -> bool,
{
    check(items.into_iter().all(predicate), observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::GuardOutcome;
    use crate::testing::Recorder;

    #[test]
    fn test_null_or_empty() {
        assert!(null_or_empty(None::<&str>, None));
        assert!(null_or_empty("", None));
        assert!(null_or_empty(&0u64, None));
        assert!(null_or_empty(Some(&String::new()), None));
        assert!(!null_or_empty(&[1u8][..], None));
        assert!(!null_or_empty(&true, None));
    }

    #[test]
    fn test_comparisons() {
        assert!(greater_than(&3, &2, None));
        assert!(!greater_than(&2, &2, None));
        assert!(greater_than_or_equal(&2, &2, None));
        assert!(less_than(&1.5, &2.0, None));
        assert!(less_than_or_equal("a", "a", None));
        assert!(!less_than(&f64::NAN, &0.0, None));
    }

    #[test]
    fn test_between_is_inclusive() {
        assert!(between(&1, &1, &3, None));
        assert!(between(&3, &1, &3, None));
        assert!(!between(&4, &1, &3, None));
        assert!(!between(&2, &3, &1, None));
    }

    #[test]
    fn test_explicit_ordering() {
        assert!(greater_than("a", "B", None));
        assert!(!greater_than_by("a", "B", compare::ignore_ascii_case, None));
        assert!(less_than_by("a", "B", compare::ignore_ascii_case, None));
        assert!(less_than_or_equal_by(
            &String::from("abc"),
            "ABC",
            compare::ignore_ascii_case,
            None
        ));
        assert!(between_by("m", "A", "Z", compare::ignore_ascii_case, None));
        assert!(greater_than_or_equal_by(&7, &3, |a: &i32, b: &i32| a.cmp(b), None));
        assert!(less_than_by(&[1, 2][..], &[1, 3][..], |a, b| a.cmp(b), None));
    }

    #[test]
    fn test_any_and_all() {
        assert!(any(vec!["x", ""], str::is_empty, None));
        assert!(!any(Vec::<u8>::new(), |_| true, None));
        assert!(all([2, 4, 6], |n| n % 2 == 0, None));
        assert!(all(Vec::<u8>::new(), |_| false, None));
    }

    #[test]
    fn test_predicates_report_their_answer() {
        let recorder = Recorder::new();
        let observer = recorder.observer();

        greater_than(&1, &2, Some(&observer));
        between(&2, &1, &3, Some(&observer));
        null_or_empty("full", Some(&observer));

        assert_eq!(
            recorder.outcomes(),
            [
                GuardOutcome::Failure,
                GuardOutcome::Success,
                GuardOutcome::Failure
            ]
        );
    }
}
