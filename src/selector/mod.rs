//! Null-safe emptiness checks through member paths
//!
//! A [`Path<T>`] is a static description of "starting from `T`, read member
//! `a`, then `b`, then `c`". It is resolved against `T`'s [`Shape`] when it is
//! built, so a malformed path is a construction-time [`SelectorError`], never
//! a runtime surprise.
//!
//! Compiling a path yields an [`Evaluator`]: absence at any hop makes the whole
//! check report *empty* without reading further, and the final member is
//! classified by a check specialised for its static type. Composite members
//! are empty when every readable member of theirs is absent or empty.
//!
//! Compiled evaluators are cached process-wide by [`EvaluatorCache::global`];
//! caching never changes what a check returns.
//!
//! # Example
//!
//! ```rust
//! use tripwire::inspect::{Field, Inspect, Shape};
//! use tripwire::selector::{is_empty_at, Path};
//!
//! struct Address {
//!     city: String,
//! }
//!
//! struct Customer {
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
//!         Shape::record::<Self>(vec![Field::optional("address", |c: &Customer| {
//!             c.address.as_ref()
//!         })])
//!     }
//! }
//!
//! let city = Path::<Customer>::parse("address.city").unwrap();
//!
//! let moved_away = Customer { address: None };
//! assert!(is_empty_at(&moved_away, &city));
//!
//! let local = Customer { address: Some(Address { city: "Oslo".into() }) };
//! assert!(!is_empty_at(&local, &city));
//!
//! assert!(Path::<Customer>::parse("address.zip").is_err());
//! ```

mod cache;
mod compile;

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use crate::inspect::{Field, Inspect, Kind, Shape, TypeKey};

pub use cache::{EvaluatorCache, DEFAULT_CAPACITY};

use compile::{Check, Hop};

/// A path that cannot be resolved against its root type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// No segments at all.
    #[error("empty selector on `{root}`")]
    Empty {
        /// Root type name.
        root: &'static str,
    },

    /// A segment that is empty or not a member name.
    #[error("invalid segment `{segment}` in selector `{path}` on `{root}`")]
    InvalidSegment {
        /// Root type name.
        root: &'static str,
        /// The full selector text.
        path: String,
        /// The offending segment.
        segment: String,
    },

    /// The member does not exist on the type reached so far.
    #[error("`{owner}` has no readable member `{member}` (selector `{path}` on `{root}`)")]
    UnknownMember {
        /// Root type name.
        root: &'static str,
        /// The full selector text.
        path: String,
        /// Type the member was looked up on.
        owner: &'static str,
        /// The missing member.
        member: String,
    },

    /// The type reached so far has no members to select from.
    #[error("cannot select `{member}` from `{owner}`, which has no members (selector `{path}` on `{root}`)")]
    NotARecord {
        /// Root type name.
        root: &'static str,
        /// The full selector text.
        path: String,
        /// Type the member was looked up on.
        owner: &'static str,
        /// The member that was asked for.
        member: String,
    },

    /// A wrapper that eventually wraps itself, with no record in between.
    #[error("`{owner}` wraps itself (selector `{path}` on `{root}`)")]
    CyclicWrapper {
        /// Root type name.
        root: &'static str,
        /// The full selector text.
        path: String,
        /// The wrapper type.
        owner: &'static str,
    },

    /// A record lists a field whose accessor reads a different record type.
    #[error("`{record}` lists member `{member}`, which reads from `{owner}` (selector `{path}` on `{root}`)")]
    FieldOwnerMismatch {
        /// Root type name.
        root: &'static str,
        /// The full selector text.
        path: String,
        /// The record that lists the field.
        record: &'static str,
        /// The field's name.
        member: String,
        /// The type the field's accessor reads from.
        owner: &'static str,
    },

    /// A shape that describes some type other than the one it stands for.
    #[error("expected a shape of `{expected}`, found one of `{described}` (selector `{path}` on `{root}`)")]
    ShapeMismatch {
        /// Root type name.
        root: &'static str,
        /// The full selector text.
        path: String,
        /// The type the shape stands for.
        expected: &'static str,
        /// The type the shape actually describes.
        described: &'static str,
    },
}

/// Structural identity of a path: its root type and canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PathKey {
    root: TypeId,
    text: Arc<str>,
}

/// A resolved member path rooted at `T`.
///
/// Cheap to clone. Build it once (for example in a `LazyLock`) when the same
/// path is checked repeatedly.
pub struct Path<T> {
    key: PathKey,
    depth: usize,
    hops: Vec<Hop>,
    leaf: Shape,
    _root: PhantomData<fn(&T)>,
}

impl<T: Inspect> Path<T> {
    /// Parse a dotted member path such as `"customer.address.city"`.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        Self::from_segments(text.split('.'))
    }

    /// Build a path from individual member names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tripwire::inspect::{Field, Inspect, Shape};
    /// use tripwire::selector::Path;
    ///
    /// struct Tag { label: String }
    ///
    /// impl Inspect for Tag {
    ///     fn shape() -> Shape {
    ///         Shape::record::<Self>(vec![Field::new("label", |t: &Tag| &t.label)])
    ///     }
    /// }
    ///
    /// let path = Path::<Tag>::from_segments(["label"]).unwrap();
    /// assert_eq!(path.as_str(), "label");
    /// assert_eq!(path, Path::parse("label").unwrap());
    /// ```
    pub fn from_segments<I, S>(segments: I) -> Result<Self, SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|segment| segment.as_ref().to_owned())
            .collect();
        resolve(segments).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "rejected selector");
        })
    }

    /// The zero-hop path: selects the root value itself.
    ///
    /// Evaluating it applies the member-wise rule to the root, so a record
    /// whose members are all absent or empty is itself empty. Fails when a
    /// shape reachable from `T` is inconsistent with the type it describes.
    pub fn root() -> Result<Self, SelectorError> {
        let root = std::any::type_name::<T>();
        let mut checker = Checker::new(root, "");
        let leaf = T::shape();
        checker
            .describes(&leaf, TypeKey::of::<T>())
            .and_then(|()| checker.subtree(&leaf))
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, "rejected selector");
            })?;

        Ok(Self {
            key: PathKey {
                root: TypeId::of::<T>(),
                text: Arc::from(""),
            },
            depth: 0,
            hops: Vec::new(),
            leaf,
            _root: PhantomData,
        })
    }

    /// Compile a fresh evaluator for this path, bypassing every cache.
    pub fn compile(&self) -> Evaluator<T> {
        Evaluator::new(self.build())
    }

    pub(crate) fn build(&self) -> Check {
        compile::chain(&self.hops, compile::terminal(&self.leaf))
    }
}

impl<T> Path<T> {
    /// Canonical dotted text; empty for [`Path::root`].
    pub fn as_str(&self) -> &str {
        &self.key.text
    }

    /// Number of members named by the path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Shape of the selected member.
    pub fn leaf(&self) -> &Shape {
        &self.leaf
    }

    pub(crate) fn key(&self) -> &PathKey {
        &self.key
    }
}

fn is_member_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
}

/// Checks that hand-written shapes agree with the types they describe.
///
/// Accessors downcast to the type they were written for, so a field listed on
/// the wrong record would silently read as absent.
struct Checker<'a> {
    root: &'static str,
    path: &'a str,
    // Types whose members were already checked.
    seen: Vec<TypeId>,
}

impl<'a> Checker<'a> {
    fn new(root: &'static str, path: &'a str) -> Self {
        Self {
            root,
            path,
            seen: Vec::new(),
        }
    }

    fn describes(&self, shape: &Shape, expected: TypeKey) -> Result<(), SelectorError> {
        if shape.type_id() == expected.id {
            return Ok(());
        }
        Err(SelectorError::ShapeMismatch {
            root: self.root,
            path: self.path.to_owned(),
            expected: expected.name,
            described: shape.type_name(),
        })
    }

    /// The shape of `field`, once it is known to belong to `record`.
    fn member(&self, record: &Shape, field: &Field) -> Result<Shape, SelectorError> {
        if field.owner().id != record.type_id() {
            return Err(SelectorError::FieldOwnerMismatch {
                root: self.root,
                path: self.path.to_owned(),
                record: record.type_name(),
                member: field.name().to_owned(),
                owner: field.owner_name(),
            });
        }
        let shape = field.shape();
        self.describes(&shape, field.member())?;
        Ok(shape)
    }

    /// Check every shape the member-wise rule would read below `shape`.
    fn subtree(&mut self, shape: &Shape) -> Result<(), SelectorError> {
        if self.seen.contains(&shape.type_id()) {
            return Ok(());
        }
        match shape.kind() {
            Kind::Wrapper { inner, target, .. } => {
                self.seen.push(shape.type_id());
                let inner = inner();
                self.describes(&inner, *target)?;
                self.subtree(&inner)
            }
            Kind::Record(fields) => {
                self.seen.push(shape.type_id());
                for field in fields {
                    let member = self.member(shape, field)?;
                    self.subtree(&member)?;
                }
                Ok(())
            }
            Kind::Leaf { .. } | Kind::Opaque => Ok(()),
        }
    }
}

fn resolve<T: Inspect>(segments: Vec<String>) -> Result<Path<T>, SelectorError> {
    let root = std::any::type_name::<T>();
    let text = segments.join(".");

    if segments.is_empty() || text.is_empty() {
        return Err(SelectorError::Empty { root });
    }

    let mut checker = Checker::new(root, &text);
    let mut current = T::shape();
    checker.describes(&current, TypeKey::of::<T>())?;
    let mut hops = Vec::new();

    for segment in &segments {
        if !is_member_name(segment) {
            return Err(SelectorError::InvalidSegment {
                root,
                path: text.clone(),
                segment: segment.clone(),
            });
        }

        // Wrappers met mid-path become null-safe hops of their own.
        let mut seen = Vec::new();
        while let Kind::Wrapper { inner, target, unwrap } = current.kind() {
            if seen.contains(&current.type_id()) {
                return Err(SelectorError::CyclicWrapper {
                    root,
                    path: text.clone(),
                    owner: current.type_name(),
                });
            }
            seen.push(current.type_id());
            hops.push(Hop::new("?", Arc::clone(unwrap)));
            let next = inner();
            checker.describes(&next, *target)?;
            current = next;
        }

        let next = match current.kind() {
            Kind::Record(_) => match current.field(segment) {
                Some(field) => {
                    let shape = checker.member(&current, field)?;
                    hops.push(Hop::new(field.name(), Arc::clone(field.accessor())));
                    shape
                }
                None => {
                    return Err(SelectorError::UnknownMember {
                        root,
                        path: text.clone(),
                        owner: current.type_name(),
                        member: segment.clone(),
                    })
                }
            },
            _ => {
                return Err(SelectorError::NotARecord {
                    root,
                    path: text.clone(),
                    owner: current.type_name(),
                    member: segment.clone(),
                })
            }
        };
        current = next;
    }

    checker.subtree(&current)?;

    Ok(Path {
        key: PathKey {
            root: TypeId::of::<T>(),
            text: Arc::from(text.as_str()),
        },
        depth: segments.len(),
        hops,
        leaf: current,
        _root: PhantomData,
    })
}

impl<T: Inspect> FromStr for Path<T> {
    type Err = SelectorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl<T> Clone for Path<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            depth: self.depth,
            hops: self.hops.clone(),
            leaf: self.leaf.clone(),
            _root: PhantomData,
        }
    }
}

impl<T> PartialEq for Path<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Path<T> {}

impl<T> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("root", &std::any::type_name::<T>())
            .field("path", &self.as_str())
            .field("hops", &self.hops)
            .field("leaf", &self.leaf.type_name())
            .finish()
    }
}

impl<T> fmt::Display for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled, immutable emptiness check for one path.
pub struct Evaluator<T> {
    check: Check,
    _root: PhantomData<fn(&T)>,
}

impl<T> Evaluator<T> {
    pub(crate) fn new(check: Check) -> Self {
        Self {
            check,
            _root: PhantomData,
        }
    }
}

impl<T: Any> Evaluator<T> {
    /// Returns `true` when the selected member is absent or empty.
    pub fn evaluate(&self, value: &T) -> bool {
        (self.check)(value)
    }
}

impl<T> Clone for Evaluator<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.check))
    }
}

impl<T> fmt::Debug for Evaluator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("root", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// Classify the member selected by `path`, using the global cache.
///
/// An absent `value` is empty without resolving anything.
pub fn is_empty_at<'a, T: Inspect>(value: impl Into<Option<&'a T>>, path: &Path<T>) -> bool {
    EvaluatorCache::global().is_empty_at(value, path)
}

/// Apply the member-wise rule to `value` itself.
///
/// Shorthand for [`is_empty_at`] with [`Path::root`]: a record is empty when
/// each of its members is absent or empty, and never when it has no members.
/// Fails like [`Path::root`] when `T`'s shape is inconsistent.
///
/// # Example
///
/// ```rust
/// use tripwire::inspect::{Field, Inspect, Shape};
/// use tripwire::selector::is_empty_members;
///
/// struct Draft {
///     title: Option<String>,
///     tags: Vec<String>,
/// }
///
/// impl Inspect for Draft {
///     fn shape() -> Shape {
///         Shape::record::<Self>(vec![
///             Field::optional("title", |d: &Draft| d.title.as_ref()),
///             Field::new("tags", |d: &Draft| &d.tags),
///         ])
///     }
/// }
///
/// assert!(is_empty_members(&Draft { title: None, tags: vec![] }).unwrap());
/// assert!(!is_empty_members(&Draft { title: Some("x".into()), tags: vec![] }).unwrap());
/// ```
pub fn is_empty_members<'a, T: Inspect>(
    value: impl Into<Option<&'a T>>,
) -> Result<bool, SelectorError> {
    Ok(is_empty_at(value, &Path::root()?))
}
