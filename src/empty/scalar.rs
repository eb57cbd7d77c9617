//! Strings, numbers, booleans and identifiers

use std::borrow::Cow;

use uuid::Uuid;

use super::Emptiness;

impl Emptiness for str {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for Cow<'_, str> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// Compared per concrete width, never through a common numeric type.
macro_rules! impl_zero_emptiness {
    ($zero:expr, [$($ty:ty),+]) => {
        $(
            impl Emptiness for $ty {
                #[inline]
                fn is_empty_value(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

impl_zero_emptiness!(0, [i8, i16, i32, i64, i128, isize]);
impl_zero_emptiness!(0, [u8, u16, u32, u64, u128, usize]);
impl_zero_emptiness!(0.0, [f32, f64]);

impl Emptiness for bool {
    #[inline]
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl Emptiness for char {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == '\0'
    }
}

impl Emptiness for () {
    #[inline]
    fn is_empty_value(&self) -> bool {
        true
    }
}

impl Emptiness for Uuid {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_nil()
    }
}
