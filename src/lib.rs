//! # Tripwire
//!
//! > *"Check the wire before you cross it"*
//!
//! A Rust library for declaring and enforcing preconditions.
//!
//! ## Philosophy
//!
//! A precondition is either a **question** or a **tripwire**:
//! - [`is`] asks: every predicate returns a `bool` and reports what it found
//! - [`throw_if`] enforces: every guard fails with a signal when its predicate holds
//!
//! Both are built on one definition of *empty* ([`empty`]) that can be applied
//! deep inside a value through null-safe member paths ([`selector`]), and both
//! report to optional [`Observer`]s that can never change a guard's result.
//!
//! ## Quick Example
//!
//! ```rust
//! use tripwire::guard::{raise, Violation};
//! use tripwire::inspect::{Field, Inspect, Shape};
//! use tripwire::selector::Path;
//! use tripwire::{is, throw_if};
//!
//! struct Address {
//!     city: String,
//! }
//!
//! struct Order {
//!     quantity: u32,
//!     ship_to: Option<Address>,
//! }
//!
//! impl Inspect for Address {
//!     fn shape() -> Shape {
//!         Shape::record::<Self>(vec![Field::new("city", |a: &Address| &a.city)])
//!     }
//! }
//!
//! impl Inspect for Order {
//!     fn shape() -> Shape {
//!         Shape::record::<Self>(vec![
//!             Field::new("quantity", |o: &Order| &o.quantity),
//!             Field::optional("ship_to", |o: &Order| o.ship_to.as_ref()),
//!         ])
//!     }
//! }
//!
//! fn accept(order: &Order) -> Result<(), Violation> {
//!     let city = Path::<Order>::parse("ship_to.city").expect("valid path");
//!
//!     throw_if::null_or_empty_at(order, &city, raise::standard(), None)?;
//!     throw_if::greater_than(&order.quantity, &100, raise::standard(), None)?;
//!     Ok(())
//! }
//!
//! let pickup = Order { quantity: 3, ship_to: None };
//! assert!(accept(&pickup).is_err());
//!
//! let delivery = Order {
//!     quantity: 3,
//!     ship_to: Some(Address { city: "Lisbon".into() }),
//! };
//! assert!(accept(&delivery).is_ok());
//! assert!(is::between(&delivery.quantity, &1, &100, None));
//! ```
//!
//! ## Features
//!
//! - `tracing`: debug logs for selector compilation, cache resets and
//!   signal activation failures
//! - `serde`: `Serialize`/`Deserialize` for [`GuardOutcome`]
//! - `proptest`: `Arbitrary` for [`GuardOutcome`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod empty;
pub mod guard;
pub mod inspect;
pub mod is;
pub mod selector;
pub mod testing;
pub mod throw_if;

// Re-exports
pub use empty::{is_empty, Emptiness};
pub use guard::{check, guard, GuardError, GuardOutcome, Observer, Violation};
pub use inspect::{Field, Inspect, Shape};
pub use selector::{is_empty_at, is_empty_members, EvaluatorCache, Path, SelectorError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::empty::{is_empty, Emptiness};
    pub use crate::guard::raise::{self, Raise};
    pub use crate::guard::{
        activate, check, guard, Activate, ActivationError, Args, Constructors, GuardError,
        GuardOutcome, Observer, Violation,
    };
    pub use crate::inspect::{Field, Inspect, Shape};
    pub use crate::selector::{is_empty_at, is_empty_members, Path, SelectorError};
    pub use crate::{args, is, throw_if};
}
