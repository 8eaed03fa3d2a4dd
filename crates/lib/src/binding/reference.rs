//! Reference handles filled in after traversal.

use std::{
    any::Any,
    cell::OnceCell,
    fmt,
    marker::PhantomData,
    rc::{Rc, Weak},
};

use serde::{Serialize, Serializer};

use super::Object;

/// Untyped shared slot behind a [`Ref`].
///
/// The hydrator keeps one clone in its deferred queue and hands another to
/// the owning object; resolving through either is visible through both.
#[derive(Clone, Default)]
pub(crate) struct Link {
    id: Rc<str>,
    target: Rc<OnceCell<Weak<dyn Any>>>,
}

impl Link {
    pub(crate) fn new(id: impl Into<Rc<str>>) -> Self {
        Self {
            id: id.into(),
            target: Rc::new(OnceCell::new()),
        }
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    /// Points the link at `object`. A link resolves at most once.
    pub(crate) fn resolve(&self, object: &Object) -> bool {
        self.target.set(Rc::downgrade(object)).is_ok()
    }

    fn upgrade(&self) -> Option<Object> {
        self.target.get().and_then(Weak::upgrade)
    }
}

/// A reference from one hydrated object to another, by identity.
///
/// The link is weak: the referenced object is owned by its place in the
/// graph, so self and ancestor references do not form ownership cycles.
/// [`Ref::get`] returns `None` before resolution and after the graph that
/// owns the target has been dropped.
pub struct Ref<T> {
    link: Link,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Ref<T> {
    pub(crate) fn from_link(link: Link) -> Self {
        Self {
            link,
            _marker: PhantomData,
        }
    }

    /// The identity value this reference points to.
    pub fn id(&self) -> &str {
        self.link.id()
    }

    /// Returns true once the reference has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.link.target.get().is_some()
    }

    /// The referenced object, if resolved and still alive.
    pub fn get(&self) -> Option<Rc<T>> {
        self.link.upgrade()?.downcast::<T>().ok()
    }
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Self {
            link: Link::default(),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            link: self.link.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("id", &self.link.id())
            .field("resolved", &self.link.target.get().is_some())
            .finish()
    }
}

/// References serialize as their identity value.
impl<T> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.link.id())
    }
}
