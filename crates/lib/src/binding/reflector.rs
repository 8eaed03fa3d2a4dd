//! Per-type binding metadata cache.

use std::{
    any::{Any, TypeId},
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use super::{Bind, Binding};

/// Supplies the [`Binding`] of a type, building it once per reflector.
///
/// Bindings are derived from [`Bind::bind`] the first time a type is
/// requested and reused for every later hydration call.
#[derive(Default)]
pub struct Reflector {
    bindings: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
}

impl Reflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding of `T`.
    pub fn binding<T: Bind>(&self) -> Rc<Binding<T>> {
        let id = TypeId::of::<T>();
        let cached = self.bindings.borrow().get(&id).cloned();
        if let Some(binding) = cached.and_then(|b| b.downcast::<Binding<T>>().ok()) {
            return binding;
        }

        let mut binding = Binding::new(T::NAME);
        T::bind(&mut binding);
        tracing::trace!(
            type_name = T::NAME,
            properties = binding.properties().len(),
            "Built binding"
        );

        let binding = Rc::new(binding);
        self.bindings.borrow_mut().insert(id, binding.clone());
        binding
    }

    /// Number of cached bindings.
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

impl std::fmt::Debug for Reflector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reflector")
            .field("cached", &self.len())
            .finish()
    }
}
