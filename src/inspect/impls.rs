//! Shapes of standard, identifier and temporal types

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use uuid::Uuid;

use super::{Inspect, LeafClass, Shape};
use crate::empty::Iterable;

macro_rules! inspect_leaf {
    ($class:ident: [$($ty:ty),+ $(,)?]) => {
        $(
            impl Inspect for $ty {
                fn shape() -> Shape {
                    Shape::leaf::<Self>(LeafClass::$class)
                }
            }
        )+
    };
}

inspect_leaf!(Text: [String, &'static str, Cow<'static, str>, Box<str>, Rc<str>, Arc<str>]);
inspect_leaf!(Numeric: [i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64]);
inspect_leaf!(Boolean: [bool]);
inspect_leaf!(Identifier: [Uuid]);
inspect_leaf!(Temporal: [Duration, SystemTime, TimeDelta, NaiveDate, NaiveTime, NaiveDateTime]);
inspect_leaf!(Default: [char, ()]);

impl<Tz: TimeZone + 'static> Inspect for DateTime<Tz> {
    fn shape() -> Shape {
        Shape::leaf::<Self>(LeafClass::Temporal)
    }
}

impl<T: 'static, const N: usize> Inspect for [T; N] {
    fn shape() -> Shape {
        Shape::leaf::<Self>(LeafClass::Sequence)
    }
}

impl<T: Clone + 'static> Inspect for Cow<'static, [T]> {
    fn shape() -> Shape {
        Shape::leaf::<Self>(LeafClass::Sequence)
    }
}

macro_rules! inspect_generic {
    ($class:ident: $([$($params:ident),+] $ty:ty),+ $(,)?) => {
        $(
            impl<$($params: 'static),+> Inspect for $ty {
                fn shape() -> Shape {
                    Shape::leaf::<Self>(LeafClass::$class)
                }
            }
        )+
    };
}

// Owned slices are sequences themselves, not wrappers around one.
inspect_generic!(Sequence:
    [T] Vec<T>,
    [T] Box<[T]>,
    [T] Rc<[T]>,
    [T] Arc<[T]>,
);

inspect_generic!(Counted:
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [T, S] HashSet<T, S>,
    [K, V, S] HashMap<K, V, S>,
    [T] BTreeSet<T>,
    [K, V] BTreeMap<K, V>,
);

impl<I: 'static> Inspect for Iterable<I>
where
    for<'a> &'a I: IntoIterator,
{
    fn shape() -> Shape {
        Shape::leaf::<Self>(LeafClass::Iterable)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn shape() -> Shape {
        Shape::wrapper::<Self, T>(Option::as_ref)
    }
}

impl<T: Inspect> Inspect for Box<T> {
    fn shape() -> Shape {
        Shape::wrapper::<Self, T>(|boxed| Some(&**boxed))
    }
}

impl<T: Inspect> Inspect for Rc<T> {
    fn shape() -> Shape {
        Shape::wrapper::<Self, T>(|shared| Some(&**shared))
    }
}

impl<T: Inspect> Inspect for Arc<T> {
    fn shape() -> Shape {
        Shape::wrapper::<Self, T>(|shared| Some(&**shared))
    }
}
