//! Building signals on demand from a runtime argument list
//!
//! A signal type lists the constructors it offers through [`Activate`].
//! [`activate`] picks the first constructor whose parameter types match the
//! supplied [`Args`] exactly, in order, and calls it.

use std::any::{type_name, Any, TypeId};
use std::fmt;

/// Ordered, type-erased constructor arguments.
///
/// Usually built with the [`args!`](crate::args) macro.
#[derive(Default)]
pub struct Args {
    values: Vec<Arg>,
}

struct Arg {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl Args {
    /// An empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument.
    pub fn with<T: Any + Send>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Append one argument in place.
    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.values.push(Arg {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: Box::new(value),
        });
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Type names of the arguments, in order.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.values.iter().map(|arg| arg.type_name).collect()
    }

    fn matches(&self, params: &[TypeId]) -> bool {
        self.values.len() == params.len()
            && self
                .values
                .iter()
                .zip(params)
                .all(|(arg, param)| arg.type_id == *param)
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}

/// Build an [`Args`] list from values.
///
/// # Example
///
/// ```rust
/// use tripwire::args;
///
/// let args = args!["limit", 10u32];
/// assert_eq!(args.len(), 2);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::guard::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::guard::Args::new()$(.with($value))+
    };
}

type Build<S> = Box<dyn Fn(Vec<Box<dyn Any + Send>>) -> Option<S> + Send + Sync>;

struct Constructor<S> {
    params: Vec<TypeId>,
    build: Build<S>,
}

/// Constructors a signal type offers for activation, tried in order.
pub struct Constructors<S> {
    list: Vec<Constructor<S>>,
}

fn take<T: Any>(value: Option<Box<dyn Any + Send>>) -> Option<T> {
    value?.downcast::<T>().ok().map(|boxed| *boxed)
}

impl<S> Constructors<S> {
    /// No constructors; every activation fails.
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    fn push(mut self, params: Vec<TypeId>, build: Build<S>) -> Self {
        self.list.push(Constructor { params, build });
        self
    }

    /// A constructor taking no arguments.
    pub fn nullary<F>(self, make: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.try_nullary(move || Some(make()))
    }

    /// A nullary constructor that may decline to build.
    pub fn try_nullary<F>(self, make: F) -> Self
    where
        F: Fn() -> Option<S> + Send + Sync + 'static,
    {
        self.push(Vec::new(), Box::new(move |_| make()))
    }

    /// A constructor taking one argument.
    pub fn unary<A, F>(self, make: F) -> Self
    where
        A: Any,
        F: Fn(A) -> S + Send + Sync + 'static,
    {
        self.try_unary(move |a| Some(make(a)))
    }

    /// A unary constructor that may decline to build.
    pub fn try_unary<A, F>(self, make: F) -> Self
    where
        A: Any,
        F: Fn(A) -> Option<S> + Send + Sync + 'static,
    {
        self.push(
            vec![TypeId::of::<A>()],
            Box::new(move |values| {
                let mut values = values.into_iter();
                make(take::<A>(values.next())?)
            }),
        )
    }

    /// A constructor taking two arguments.
    pub fn binary<A, B, F>(self, make: F) -> Self
    where
        A: Any,
        B: Any,
        F: Fn(A, B) -> S + Send + Sync + 'static,
    {
        self.try_binary(move |a, b| Some(make(a, b)))
    }

    /// A binary constructor that may decline to build.
    pub fn try_binary<A, B, F>(self, make: F) -> Self
    where
        A: Any,
        B: Any,
        F: Fn(A, B) -> Option<S> + Send + Sync + 'static,
    {
        self.push(
            vec![TypeId::of::<A>(), TypeId::of::<B>()],
            Box::new(move |values| {
                let mut values = values.into_iter();
                let a = take::<A>(values.next())?;
                let b = take::<B>(values.next())?;
                make(a, b)
            }),
        )
    }

    /// A constructor taking three arguments.
    pub fn ternary<A, B, C, F>(self, make: F) -> Self
    where
        A: Any,
        B: Any,
        C: Any,
        F: Fn(A, B, C) -> S + Send + Sync + 'static,
    {
        self.try_ternary(move |a, b, c| Some(make(a, b, c)))
    }

    /// A ternary constructor that may decline to build.
    pub fn try_ternary<A, B, C, F>(self, make: F) -> Self
    where
        A: Any,
        B: Any,
        C: Any,
        F: Fn(A, B, C) -> Option<S> + Send + Sync + 'static,
    {
        self.push(
            vec![TypeId::of::<A>(), TypeId::of::<B>(), TypeId::of::<C>()],
            Box::new(move |values| {
                let mut values = values.into_iter();
                let a = take::<A>(values.next())?;
                let b = take::<B>(values.next())?;
                let c = take::<C>(values.next())?;
                make(a, b, c)
            }),
        )
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if no constructors are registered.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<S> Default for Constructors<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Constructors<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructors")
            .field("signal", &type_name::<S>())
            .field("len", &self.list.len())
            .finish()
    }
}

/// A signal type that can be built from a runtime argument list.
///
/// # Example
///
/// ```rust
/// use tripwire::args;
/// use tripwire::guard::{activate, Activate, Constructors};
///
/// #[derive(Debug, PartialEq)]
/// struct LimitExceeded {
///     limit: u32,
/// }
///
/// impl Activate for LimitExceeded {
///     fn constructors() -> Constructors<Self> {
///         Constructors::new()
///             .nullary(|| LimitExceeded { limit: 0 })
///             .unary(|limit: u32| LimitExceeded { limit })
///     }
/// }
///
/// assert_eq!(activate::<LimitExceeded>(None), Ok(LimitExceeded { limit: 0 }));
/// assert_eq!(
///     activate::<LimitExceeded>(Some(args![5u32])),
///     Ok(LimitExceeded { limit: 5 })
/// );
/// assert!(activate::<LimitExceeded>(Some(args!["five"])).is_err());
/// ```
pub trait Activate: Sized {
    /// The constructors offered, tried in order.
    fn constructors() -> Constructors<Self>;
}

/// A signal type could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivationError {
    /// No constructor accepts the argument types, in order.
    #[error("no constructor of `{signal}` accepts ({})", .arguments.join(", "))]
    NoMatchingConstructor {
        /// The signal type.
        signal: &'static str,
        /// Type names of the supplied arguments.
        arguments: Vec<&'static str>,
    },

    /// A matching constructor declined to build.
    #[error("could not create an instance of `{signal}`")]
    Instantiation {
        /// The signal type.
        signal: &'static str,
    },
}

/// Build an `S` from `args`; `None` means no arguments.
pub fn activate<S: Activate>(args: Option<Args>) -> Result<S, ActivationError> {
    let args = args.unwrap_or_default();
    let constructors = S::constructors();

    let Some(constructor) = constructors
        .list
        .iter()
        .find(|constructor| args.matches(&constructor.params))
    else {
        return Err(ActivationError::NoMatchingConstructor {
            signal: type_name::<S>(),
            arguments: args.type_names(),
        });
    };

    let values = args.values.into_iter().map(|arg| arg.value).collect();
    (constructor.build)(values).ok_or(ActivationError::Instantiation {
        signal: type_name::<S>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Refused {
        Plain,
        Reason(String),
        Range(i64, i64),
        Full(String, u8, bool),
    }

    impl Activate for Refused {
        fn constructors() -> Constructors<Self> {
            Constructors::new()
                .nullary(|| Refused::Plain)
                .unary(Refused::Reason)
                .try_unary(|code: u8| (code != 0).then(|| Refused::Reason(code.to_string())))
                .binary(Refused::Range)
                .ternary(Refused::Full)
        }
    }

    struct Unbuildable;

    impl Activate for Unbuildable {
        fn constructors() -> Constructors<Self> {
            Constructors::new()
        }
    }

    #[test]
    fn test_no_args_uses_nullary() {
        assert_eq!(activate::<Refused>(None), Ok(Refused::Plain));
        assert_eq!(activate::<Refused>(Some(args![])), Ok(Refused::Plain));
    }

    #[test]
    fn test_arity_and_types_select_constructor() {
        assert_eq!(
            activate::<Refused>(Some(args![String::from("closed")])),
            Ok(Refused::Reason("closed".into()))
        );
        assert_eq!(
            activate::<Refused>(Some(args![1i64, 9i64])),
            Ok(Refused::Range(1, 9))
        );
        assert_eq!(
            activate::<Refused>(Some(args![String::from("x"), 3u8, true])),
            Ok(Refused::Full("x".into(), 3, true))
        );
    }

    #[test]
    fn test_argument_order_matters() {
        let err = activate::<Refused>(Some(args![3u8, String::from("x"), true])).unwrap_err();
        assert_eq!(
            err,
            ActivationError::NoMatchingConstructor {
                signal: type_name::<Refused>(),
                arguments: vec!["u8", "alloc::string::String", "bool"],
            }
        );
    }

    #[test]
    fn test_declined_construction() {
        assert_eq!(
            activate::<Refused>(Some(args![0u8])),
            Err(ActivationError::Instantiation {
                signal: type_name::<Refused>()
            })
        );
        assert_eq!(
            activate::<Refused>(Some(args![4u8])),
            Ok(Refused::Reason("4".into()))
        );
    }

    #[test]
    fn test_type_without_constructors() {
        let err = activate::<Unbuildable>(None).err().unwrap();
        assert!(err.to_string().contains("Unbuildable"));
        assert!(err.to_string().ends_with("accepts ()"));
    }

    #[test]
    fn test_args_debug_lists_types() {
        assert_eq!(format!("{:?}", args![1u16, 'c']), r#"["u16", "char"]"#);
    }
}
