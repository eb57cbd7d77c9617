//! The built-in signal raised by `throw_if` guards

use std::fmt::Debug;

/// A guard tripped on one of the built-in predicates.
///
/// Offending values are kept as their `Debug` rendering so the signal owns
/// no borrowed data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The value was absent or empty.
    #[error("value of type `{type_name}` is null or empty")]
    NullOrEmpty {
        /// Type of the checked value.
        type_name: &'static str,
    },

    /// `left > right`.
    #[error("{left} is greater than {right}")]
    GreaterThan {
        /// Left operand.
        left: String,
        /// Right operand.
        right: String,
    },

    /// `left >= right`.
    #[error("{left} is greater than or equal to {right}")]
    GreaterThanOrEqual {
        /// Left operand.
        left: String,
        /// Right operand.
        right: String,
    },

    /// `left < right`.
    #[error("{left} is less than {right}")]
    LessThan {
        /// Left operand.
        left: String,
        /// Right operand.
        right: String,
    },

    /// `left <= right`.
    #[error("{left} is less than or equal to {right}")]
    LessThanOrEqual {
        /// Left operand.
        left: String,
        /// Right operand.
        right: String,
    },

    /// `min <= value <= max`.
    #[error("{value} is between {min} and {max}")]
    Between {
        /// The checked value.
        value: String,
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
    },

    /// Some element satisfied the predicate.
    #[error("at least one element satisfied the given predicate")]
    Any,

    /// Every element satisfied the predicate.
    #[error("every element satisfied the given predicate")]
    All,
}

fn render<T: Debug + ?Sized>(value: &T) -> String {
    format!("{:?}", value)
}

impl Violation {
    pub(crate) fn null_or_empty<T: ?Sized>() -> Self {
        Self::NullOrEmpty {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn greater_than<L: Debug + ?Sized, R: Debug + ?Sized>(left: &L, right: &R) -> Self {
        Self::GreaterThan {
            left: render(left),
            right: render(right),
        }
    }

    pub(crate) fn greater_than_or_equal<L: Debug + ?Sized, R: Debug + ?Sized>(
        left: &L,
        right: &R,
    ) -> Self {
        Self::GreaterThanOrEqual {
            left: render(left),
            right: render(right),
        }
    }

    pub(crate) fn less_than<L: Debug + ?Sized, R: Debug + ?Sized>(left: &L, right: &R) -> Self {
        Self::LessThan {
            left: render(left),
            right: render(right),
        }
    }

    pub(crate) fn less_than_or_equal<L: Debug + ?Sized, R: Debug + ?Sized>(
        left: &L,
        right: &R,
    ) -> Self {
        Self::LessThanOrEqual {
            left: render(left),
            right: render(right),
        }
    }

    pub(crate) fn between<T, B>(value: &T, min: &B, max: &B) -> Self
    where
        T: Debug + ?Sized,
        B: Debug + ?Sized,
    {
        Self::Between {
            value: render(value),
            min: render(min),
            max: render(max),
        }
    }
}
