//! Collections, absence and indirection

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::Emptiness;

impl<T: Emptiness> Emptiness for Option<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.as_ref().is_none_or(Emptiness::is_empty_value)
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &mut T {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Box<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Rc<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Arc<T> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T> Emptiness for [T] {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Emptiness for [T; N] {
    #[inline]
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T: Clone> Emptiness for Cow<'_, [T]> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_counted_emptiness {
    ($([$($params:tt)*] $ty:ty),+ $(,)?) => {
        $(
            impl<$($params)*> Emptiness for $ty {
                #[inline]
                fn is_empty_value(&self) -> bool {
                    self.len() == 0
                }
            }
        )+
    };
}

impl_counted_emptiness!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [T, S] HashSet<T, S>,
    [K, V, S] HashMap<K, V, S>,
    [T] BTreeSet<T>,
    [K, V] BTreeMap<K, V>,
);

/// A collection that can only be iterated, not counted.
///
/// Empty when the first advance of a fresh iterator yields nothing. Only
/// shared iteration (`&I: IntoIterator`) is required, so classification never
/// consumes the wrapped value.
///
/// # Example
///
/// ```rust
/// use tripwire::empty::{is_empty, Iterable};
/// use std::ops::Range;
///
/// struct Evens(Range<u32>);
///
/// fn even(n: &u32) -> bool {
///     n % 2 == 0
/// }
///
/// impl<'a> IntoIterator for &'a Evens {
///     type Item = u32;
///     type IntoIter = std::iter::Filter<Range<u32>, fn(&u32) -> bool>;
///
///     fn into_iter(self) -> Self::IntoIter {
///         self.0.clone().filter(even as fn(&u32) -> bool)
///     }
/// }
///
/// assert!(is_empty(&Iterable(Evens(1..2))));
/// assert!(!is_empty(&Iterable(Evens(1..3))));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iterable<I>(pub I);

impl<I> Emptiness for Iterable<I>
where
    for<'a> &'a I: IntoIterator,
{
    #[inline]
    fn is_empty_value(&self) -> bool {
        first_advance_fails(&self.0)
    }
}

/// Returns `true` when the first advance of `iterable`'s iterator fails.
///
/// The iterator is dropped before returning, whatever the outcome.
///
/// # Example
///
/// ```rust
/// use tripwire::empty::first_advance_fails;
///
/// assert!(first_advance_fails(std::iter::empty::<u8>()));
/// assert!(!first_advance_fails((0..).filter(|n| n % 7 == 3)));
/// ```
#[inline]
pub fn first_advance_fails<I: IntoIterator>(iterable: I) -> bool {
    let mut iter = iterable.into_iter();
    iter.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::empty::is_empty;
    use std::cell::Cell;

    #[test]
    fn test_counted_collections() {
        assert!(is_empty(&Vec::<u8>::new()));
        assert!(!is_empty(&vec![0u8]));
        assert!(is_empty(&VecDeque::<u8>::new()));
        assert!(is_empty(&LinkedList::<u8>::new()));
        assert!(is_empty(&BinaryHeap::<u8>::new()));
        assert!(is_empty(&HashSet::<u8>::new()));
        assert!(!is_empty(&HashMap::from([("k", 1)])));
        assert!(is_empty(&BTreeSet::<u8>::new()));
        assert!(!is_empty(&BTreeMap::from([(1, "v")])));
    }

    #[test]
    fn test_elements_do_not_matter() {
        // a collection of empty things still has a count
        assert!(!is_empty(&vec![String::new()]));
        assert!(!is_empty(&[None::<i32>]));
    }

    #[test]
    fn test_slices_and_arrays() {
        let empty: [u8; 0] = [];
        assert!(is_empty(&empty));
        assert!(!is_empty(&[1, 2]));
        assert!(is_empty(&Cow::<[u8]>::Borrowed(&[])));
        assert!(is_empty(&Box::<[u8]>::from(Vec::new())));
    }

    #[test]
    fn test_indirection_delegates() {
        assert!(is_empty(&Rc::new(String::new())));
        assert!(!is_empty(&Arc::new(vec![1])));
        assert!(is_empty(&Some(Box::new(0i32))));
        assert!(!is_empty(&&&"nested"));
    }

    struct Tracked<'a> {
        items: Vec<u8>,
        dropped: &'a Cell<u32>,
    }

    struct TrackedIter<'a> {
        inner: std::slice::Iter<'a, u8>,
        dropped: &'a Cell<u32>,
    }

    impl<'a> Iterator for TrackedIter<'a> {
        type Item = &'a u8;

        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl Drop for TrackedIter<'_> {
        fn drop(&mut self) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    impl<'a> IntoIterator for &'a Tracked<'a> {
        type Item = &'a u8;
        type IntoIter = TrackedIter<'a>;

        fn into_iter(self) -> Self::IntoIter {
            TrackedIter {
                inner: self.items.iter(),
                dropped: self.dropped,
            }
        }
    }

    #[test]
    fn test_iterator_released_on_both_outcomes() {
        let dropped = Cell::new(0);

        let empty = Tracked {
            items: vec![],
            dropped: &dropped,
        };
        assert!(first_advance_fails(&empty));
        assert_eq!(dropped.get(), 1);

        let full = Tracked {
            items: vec![1, 2],
            dropped: &dropped,
        };
        assert!(!first_advance_fails(&full));
        assert_eq!(dropped.get(), 2);
    }

    #[test]
    fn test_iteration_agrees_with_count() {
        for len in 0..4 {
            let items: Vec<u32> = (0..len).collect();
            assert_eq!(is_empty(&items), is_empty(&Iterable(items.clone())));
        }
    }
}
