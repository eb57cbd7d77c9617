//! Turning a resolved path into a single composed check

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use crate::inspect::{Accessor, Field, Kind, Shape};

/// A compiled emptiness check over a type-erased value.
pub(crate) type Check = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

/// One null-safe step along a path.
#[derive(Clone)]
pub(crate) struct Hop {
    label: &'static str,
    read: Accessor,
}

impl Hop {
    pub(crate) fn new(label: &'static str, read: Accessor) -> Self {
        Self { label, read }
    }
}

impl fmt::Debug for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Wrap `terminal` in one absence check per hop, innermost hop last.
///
/// An absent value at any hop yields `true` without reading further.
pub(crate) fn chain(hops: &[Hop], terminal: Check) -> Check {
    hops.iter().rev().fold(terminal, |next, hop| {
        let read = Arc::clone(&hop.read);
        let step: Check =
            Arc::new(move |value: &dyn Any| read(value).is_none_or(|member| next(member)));
        step
    })
}

/// Build the check applied to the selected member itself.
pub(crate) fn terminal(shape: &Shape) -> Check {
    Builder::default().build(shape)
}

type Cell = Arc<OnceLock<Check>>;

#[derive(Default)]
struct Builder {
    // Composite shapes whose checks are still being built.
    in_progress: Vec<(TypeId, Cell)>,
}

impl Builder {
    fn build(&mut self, shape: &Shape) -> Check {
        match shape.kind() {
            Kind::Leaf { check, .. } => {
                let check = *check;
                Arc::new(move |value: &dyn Any| check(value))
            }
            Kind::Wrapper { inner, unwrap, .. } => {
                let unwrap = Arc::clone(unwrap);
                self.guarded(shape, |builder: &mut Self| -> Check {
                    let inner = builder.build(&inner());
                    Arc::new(move |value: &dyn Any| unwrap(value).is_none_or(|v| inner(v)))
                })
            }
            Kind::Record(fields) => self.guarded(shape, |builder| builder.record(fields)),
            // Reached only when present.
            Kind::Opaque => Arc::new(|_: &dyn Any| false),
        }
    }

    fn record(&mut self, fields: &[Field]) -> Check {
        if fields.is_empty() {
            return Arc::new(|_: &dyn Any| false);
        }

        let members: Vec<(Accessor, Check)> = fields
            .iter()
            .map(|field| (Arc::clone(field.accessor()), self.build(&field.shape())))
            .collect();

        Arc::new(move |value: &dyn Any| {
            members
                .iter()
                .all(|(read, check)| read(value).is_none_or(|member| check(member)))
        })
    }

    /// Build a composite check, tying the knot if the type refers to itself.
    ///
    /// A self-reference found while building resolves to a weak link to the
    /// enclosing check, filled in once that check is complete. The weak link
    /// keeps compiled checks free of reference cycles.
    fn guarded(&mut self, shape: &Shape, build: impl FnOnce(&mut Self) -> Check) -> Check {
        if let Some((_, cell)) = self.in_progress.iter().find(|(id, _)| *id == shape.type_id()) {
            let link: Weak<OnceLock<Check>> = Arc::downgrade(cell);
            return Arc::new(move |value: &dyn Any| {
                link.upgrade()
                    .is_some_and(|cell| cell.get().is_some_and(|check| check(value)))
            });
        }

        let cell: Cell = Arc::new(OnceLock::new());
        self.in_progress.push((shape.type_id(), Arc::clone(&cell)));
        let check = build(self);
        self.in_progress.pop();

        if Arc::weak_count(&cell) == 0 {
            return check;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(type_name = shape.type_name(), "closed recursive member check");

        let _ = cell.set(check);
        Arc::new(move |value: &dyn Any| cell.get().is_some_and(|check| check(value)))
    }
}
