//! Static type descriptions for member-path evaluation
//!
//! A [`Path`](crate::selector::Path) names members by text, so the types it
//! walks through must describe themselves. [`Inspect`] publishes a [`Shape`]:
//!
//! - **leaf** types are classified by their [`Emptiness`] impl
//! - **wrappers** (`Option`, `Box`, `Rc`, `Arc`) may be absent and are otherwise
//!   looked through
//! - **records** list their publicly readable members as [`Field`]s
//! - **opaque** types expose nothing and are only ever checked for absence
//!
//! # Example
//!
//! ```rust
//! use tripwire::inspect::{Field, Inspect, Shape};
//!
//! struct Address {
//!     city: String,
//! }
//!
//! struct Customer {
//!     name: String,
//!     address: Option<Address>,
//! }
//!
//! impl Inspect for Address {
//!     fn shape() -> Shape {
//!         Shape::record::<Self>(vec![Field::new("city", |a: &Address| &a.city)])
//!     }
//! }
//!
//! impl Inspect for Customer {
//!     fn shape() -> Shape {
//!         Shape::record::<Self>(vec![
//!             Field::new("name", |c: &Customer| &c.name),
//!             Field::optional("address", |c: &Customer| c.address.as_ref()),
//!         ])
//!     }
//! }
//!
//! let shape = Customer::shape();
//! assert_eq!(shape.fields().len(), 2);
//! assert!(shape.field("address").is_some());
//! ```

mod impls;

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::empty::Emptiness;

/// Type-erased, null-safe read of one member: `None` means the member is absent.
pub(crate) type Accessor =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;

/// A type's identity and name, for checking descriptions against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeKey {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
}

impl TypeKey {
    pub(crate) fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}

fn accessor<F>(read: F) -> Accessor
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
{
    Arc::new(read)
}

/// A type that can describe its own shape to the path compiler.
pub trait Inspect: Any {
    /// The static description of `Self`.
    ///
    /// Must be deterministic: every call describes the same members in the
    /// same order.
    fn shape() -> Shape;
}

/// Which leaf rule classifies a value, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafClass {
    /// Strings: zero length.
    Text,
    /// Arrays and vectors: zero length.
    Sequence,
    /// Sets, maps and other counted collections: zero count.
    Counted,
    /// Iteration-only collections: first advance fails.
    Iterable,
    /// Integer and float widths: zero.
    Numeric,
    /// `false`.
    Boolean,
    /// Nil identifier.
    Identifier,
    /// Epoch, midnight or zero duration.
    Temporal,
    /// Equal to the type's `Default`.
    Default,
}

/// Coarse category of a [`Shape`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Classified by a leaf rule.
    Leaf(LeafClass),
    /// Possibly absent indirection to another shape.
    Wrapper,
    /// Composite with readable members.
    Record,
    /// Nothing to inspect.
    Opaque,
}

#[derive(Clone)]
pub(crate) enum Kind {
    Leaf {
        class: LeafClass,
        check: fn(&dyn Any) -> bool,
    },
    Wrapper {
        inner: fn() -> Shape,
        target: TypeKey,
        unwrap: Accessor,
    },
    Record(Vec<Field>),
    Opaque,
}

/// Static description of a type.
#[derive(Clone)]
pub struct Shape {
    type_id: TypeId,
    type_name: &'static str,
    kind: Kind,
}

fn leaf_check<T: Emptiness + Any>(value: &dyn Any) -> bool {
    value.downcast_ref::<T>().is_some_and(T::is_empty_value)
}

impl Shape {
    /// A leaf classified by `T`'s [`Emptiness`] impl.
    pub fn leaf<T: Emptiness + Any>(class: LeafClass) -> Self {
        Self::of::<T>(Kind::Leaf {
            class,
            check: leaf_check::<T>,
        })
    }

    /// An indirection `W` that may be absent and otherwise yields a `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tripwire::inspect::{Category, Inspect, Shape};
    ///
    /// struct Maybe(Option<u32>);
    ///
    /// impl Inspect for Maybe {
    ///     fn shape() -> Shape {
    ///         Shape::wrapper::<Self, u32>(|m: &Maybe| m.0.as_ref())
    ///     }
    /// }
    ///
    /// assert_eq!(Maybe::shape().category(), Category::Wrapper);
    /// ```
    pub fn wrapper<W: Any, T: Inspect>(unwrap: fn(&W) -> Option<&T>) -> Self {
        Self::of::<W>(Kind::Wrapper {
            inner: T::shape,
            target: TypeKey::of::<T>(),
            unwrap: accessor(move |value| {
                value
                    .downcast_ref::<W>()
                    .and_then(unwrap)
                    .map(|inner| inner as &dyn Any)
            }),
        })
    }

    /// A composite type with the given readable members.
    ///
    /// A record with no members is never empty.
    pub fn record<R: Any>(fields: Vec<Field>) -> Self {
        Self::of::<R>(Kind::Record(fields))
    }

    /// A type with nothing to inspect; present values are never empty.
    pub fn opaque<T: Any>() -> Self {
        Self::of::<T>(Kind::Opaque)
    }

    fn of<T: Any>(kind: Kind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            kind,
        }
    }

    /// The described type's id.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The described type's name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Coarse category of this shape.
    pub fn category(&self) -> Category {
        match &self.kind {
            Kind::Leaf { class, .. } => Category::Leaf(*class),
            Kind::Wrapper { .. } => Category::Wrapper,
            Kind::Record(_) => Category::Record,
            Kind::Opaque => Category::Opaque,
        }
    }

    /// Members of a record; empty for every other category.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            Kind::Record(fields) => fields,
            _ => &[],
        }
    }

    /// Look up a record member by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|field| field.name == name)
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Shape");
        debug
            .field("type_name", &self.type_name)
            .field("category", &self.category());
        if let Kind::Record(fields) = &self.kind {
            debug.field("fields", &fields.iter().map(Field::name).collect::<Vec<_>>());
        }
        debug.finish()
    }
}

/// A publicly readable member of a record.
///
/// A field remembers the record type its accessor reads from. Paths reject
/// a field listed on any other record.
#[derive(Clone)]
pub struct Field {
    name: &'static str,
    owner: TypeKey,
    member: TypeKey,
    shape: fn() -> Shape,
    read: Accessor,
}

impl Field {
    /// A member that is always present.
    pub fn new<R: Any, F: Inspect>(name: &'static str, get: fn(&R) -> &F) -> Self {
        Self {
            name,
            owner: TypeKey::of::<R>(),
            member: TypeKey::of::<F>(),
            shape: F::shape,
            read: accessor(move |value| {
                value
                    .downcast_ref::<R>()
                    .map(|record| get(record) as &dyn Any)
            }),
        }
    }

    /// A member that may be absent; `None` counts as empty.
    pub fn optional<R: Any, F: Inspect>(name: &'static str, get: fn(&R) -> Option<&F>) -> Self {
        Self {
            name,
            owner: TypeKey::of::<R>(),
            member: TypeKey::of::<F>(),
            shape: F::shape,
            read: accessor(move |value| {
                value
                    .downcast_ref::<R>()
                    .and_then(get)
                    .map(|member| member as &dyn Any)
            }),
        }
    }

    /// The member's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The member's shape. Resolved on demand so types may refer to themselves.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Name of the record type the accessor reads from.
    pub fn owner_name(&self) -> &'static str {
        self.owner.name
    }

    pub(crate) fn owner(&self) -> TypeKey {
        self.owner
    }

    pub(crate) fn member(&self) -> TypeKey {
        self.member
    }

    pub(crate) fn accessor(&self) -> &Accessor {
        &self.read
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("owner", &self.owner.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: u8,
        right: Option<String>,
    }

    impl Inspect for Pair {
        fn shape() -> Shape {
            Shape::record::<Self>(vec![
                Field::new("left", |p: &Pair| &p.left),
                Field::optional("right", |p: &Pair| p.right.as_ref()),
            ])
        }
    }

    #[test]
    fn test_record_fields_in_order() {
        let shape = Pair::shape();
        let names: Vec<_> = shape.fields().iter().map(Field::name).collect();
        assert_eq!(names, ["left", "right"]);
        assert_eq!(shape.category(), Category::Record);
        assert_eq!(shape.type_id(), TypeId::of::<Pair>());
    }

    #[test]
    fn test_field_reads_through_erasure() {
        let pair = Pair {
            left: 3,
            right: None,
        };
        let shape = Pair::shape();

        let read_left = shape.field("left").unwrap().accessor();
        let left = read_left(&pair as &dyn Any);
        assert_eq!(left.and_then(|v| v.downcast_ref::<u8>()), Some(&3));

        let read_right = shape.field("right").unwrap().accessor();
        assert!(read_right(&pair as &dyn Any).is_none());
    }

    #[test]
    fn test_field_shape_is_lazy_and_typed() {
        let shape = Pair::shape();
        let right = shape.field("right").unwrap().shape();
        assert_eq!(right.category(), Category::Leaf(LeafClass::Text));
        assert_eq!(right.type_id(), TypeId::of::<String>());
    }

    #[test]
    fn test_field_remembers_its_types() {
        let shape = Pair::shape();
        let left = shape.field("left").unwrap();
        assert_eq!(left.owner(), TypeKey::of::<Pair>());
        assert_eq!(left.member(), TypeKey::of::<u8>());
        assert!(left.owner_name().ends_with("Pair"));

        let right = shape.field("right").unwrap();
        assert_eq!(right.member(), TypeKey::of::<String>());
    }

    #[test]
    fn test_non_record_has_no_fields() {
        assert!(u32::shape().fields().is_empty());
        assert!(u32::shape().field("anything").is_none());
    }

    #[test]
    fn test_debug_lists_member_names() {
        let rendered = format!("{:?}", Pair::shape());
        assert!(rendered.contains("left"));
        assert!(rendered.contains("Record"));
    }
}
