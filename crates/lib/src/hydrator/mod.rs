//! The hydration engine.
//!
//! [`Hydrator::hydrate`] walks a [`Data`] tree depth-first and builds the
//! typed object graph its [`Bind`] metadata describes:
//!
//! 1. every visited node that carries the identity key (`@id` by default)
//!    registers the object being built under that identity,
//! 2. primitive, date, simple-content and complex properties are resolved
//!    while the node is visited,
//! 3. reference properties are only recorded, because they may point at
//!    nodes later in the document,
//! 4. when the outermost call unwinds the recorded references are resolved
//!    against the identity table, in the order they were recorded.
//!
//! All per-call state lives in a [`HydrationContext`] that is created for one
//! top-level call and dropped when it returns, whether it succeeded or not.
//! A failure anywhere aborts the whole call; no partial graph is returned.

use std::{
    any::Any,
    cell::OnceCell,
    collections::{HashMap, hash_map::Entry},
    rc::Rc,
};

use crate::{
    Result,
    binding::{Bind, Binding, Link, Object, Property, Reflector, Rule},
    config::HydratorConfig,
    constants::CONTENT_KEY,
    data::{Data, DataError, Value},
};

/// Hydrates typed object graphs from document data.
///
/// A hydrator owns the metadata cache and configuration. Each call to
/// [`Hydrator::hydrate`] is independent; no state carries over between calls.
#[derive(Debug, Default)]
pub struct Hydrator {
    reflector: Reflector,
    config: HydratorConfig,
}

impl Hydrator {
    /// Creates a hydrator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hydrator with the given configuration.
    pub fn with_config(config: HydratorConfig) -> Self {
        Self {
            reflector: Reflector::new(),
            config,
        }
    }

    pub fn config(&self) -> &HydratorConfig {
        &self.config
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Builds a `T` from `data`, with every reference resolved.
    pub fn hydrate<T: Bind>(&self, data: &Data) -> Result<Rc<T>> {
        tracing::debug!(target_type = T::NAME, path = %data.location(), "Hydrating document");

        let mut context = HydrationContext::new(&self.reflector, &self.config);
        match context.hydrate::<T>(data) {
            Ok(object) => {
                tracing::debug!(target_type = T::NAME, "Hydration completed");
                Ok(object)
            }
            Err(e) => {
                tracing::debug!(target_type = T::NAME, error = %e, "Hydration aborted");
                Err(e.into())
            }
        }
    }
}

/// A reference recorded during traversal and resolved after it.
struct Deferred {
    link: Link,
    target_type: &'static str,
    accepts: fn(&dyn Any) -> bool,
    path: String,
}

impl Deferred {
    fn resolve(self, identities: &HashMap<String, Rc<OnceCell<Object>>>) -> Result<(), DataError> {
        let object = identities
            .get(self.link.id())
            .and_then(|slot| slot.get())
            .ok_or_else(|| DataError::ReferencedElementNotFound {
                id: self.link.id().to_string(),
                path: self.path.clone(),
            })?;

        if !(self.accepts)(&**object) {
            return Err(DataError::ReferenceTypeMismatch {
                id: self.link.id().to_string(),
                expected: self.target_type.to_string(),
                path: self.path,
            });
        }

        tracing::trace!(id = self.link.id(), path = %self.path, "Resolved reference");
        self.link.resolve(object);
        Ok(())
    }
}

/// State of one top-level hydration call.
///
/// Nested calls share the context; the depth counter tells the outermost
/// call apart so that only it runs the deferred reference resolution.
pub struct HydrationContext<'a> {
    reflector: &'a Reflector,
    config: &'a HydratorConfig,
    depth: usize,
    identities: HashMap<String, Rc<OnceCell<Object>>>,
    deferred: Vec<Deferred>,
}

impl<'a> HydrationContext<'a> {
    pub fn new(reflector: &'a Reflector, config: &'a HydratorConfig) -> Self {
        Self {
            reflector,
            config,
            depth: 0,
            identities: HashMap::new(),
            deferred: Vec::new(),
        }
    }

    /// Current nesting depth; zero outside of any call.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Hydrates `data` as a `T`.
    pub fn hydrate<T: Bind>(&mut self, data: &Data) -> Result<Rc<T>, DataError> {
        self.hydrate_then::<T, _>(data, |_| {})
    }

    /// Hydrates `data` as a `T`, calling `finish` on the instance after its
    /// properties are set and before it is shared.
    pub fn hydrate_then<T, F>(&mut self, data: &Data, finish: F) -> Result<Rc<T>, DataError>
    where
        T: Bind,
        F: FnOnce(&mut T),
    {
        self.depth += 1;
        let result = self.visit::<T, F>(data, finish);
        self.depth -= 1;

        if self.depth == 0 {
            self.complete(result)
        } else {
            result
        }
    }

    fn visit<T, F>(&mut self, data: &Data, finish: F) -> Result<Rc<T>, DataError>
    where
        T: Bind,
        F: FnOnce(&mut T),
    {
        if self.depth > self.config.max_depth {
            return Err(DataError::DepthLimitExceeded {
                limit: self.config.max_depth,
                path: data.path(),
            });
        }

        let binding = self.reflector.binding::<T>();
        let mut instance = T::default();

        let identity = match data.value(&self.config.identity_key) {
            Some(id) => Some(self.register_identity(id)?),
            None => None,
        };

        for property in binding.properties() {
            self.hydrate_property(data, &binding, property, &mut instance)?;
        }

        if let Some(collection) = binding.collection_contract() {
            if collection.item_key().is_empty() {
                return Err(DataError::UnsupportedMetadata {
                    reason: format!("collection {} declares no item key", binding.type_name()),
                });
            }
            for item in data.get_child_list(collection.item_key()) {
                let object = (collection.hydrate)(self, item)?;
                if !(collection.append)(&mut instance, Some(object)) {
                    return Err(DataError::UnsupportedMetadata {
                        reason: format!(
                            "collection {} rejected an item of type {}",
                            binding.type_name(),
                            collection.item_type()
                        ),
                    });
                }
            }
        }

        finish(&mut instance);

        let object = Rc::new(instance);
        if let Some(slot) = identity {
            let shared: Object = object.clone();
            // Slots are fresh per registration, so this is the only write
            let _ = slot.set(shared);
        }
        Ok(object)
    }

    fn register_identity(&mut self, value: &Value) -> Result<Rc<OnceCell<Object>>, DataError> {
        match self.identities.entry(value.to_string()) {
            Entry::Occupied(entry) => Err(DataError::DuplicateIdentity {
                id: entry.key().clone(),
                path: value.location().to_string(),
            }),
            Entry::Vacant(entry) => {
                tracing::trace!(id = entry.key().as_str(), path = %value.location(), "Registered identity");
                let slot = Rc::new(OnceCell::new());
                entry.insert(slot.clone());
                Ok(slot)
            }
        }
    }

    fn hydrate_property<T: Bind>(
        &mut self,
        data: &Data,
        binding: &Binding<T>,
        property: &Property<T>,
        instance: &mut T,
    ) -> Result<(), DataError> {
        let key = property.key();
        if key.is_empty() {
            return Err(DataError::UnsupportedMetadata {
                reason: format!("{} declares a property with an empty key", binding.type_name()),
            });
        }
        let rejected = || DataError::UnsupportedMetadata {
            reason: format!(
                "property '{key}' of {} rejected a {} value",
                binding.type_name(),
                property.declared_type()
            ),
        };

        match &property.rule {
            Rule::Primitive { ty, set } => {
                let scalar = match data.value(key) {
                    None if property.is_nullable() => None,
                    None => return Err(data.missing(key)),
                    Some(value) if property.is_nullable() && value.is_empty() => None,
                    Some(value) => Some((value, value.cast(*ty)?)),
                };
                match scalar {
                    None => {
                        if !set(instance, None) {
                            return Err(rejected());
                        }
                    }
                    Some((value, scalar)) => {
                        if !set(instance, Some(scalar)) {
                            return Err(value.invalid(property.declared_type()));
                        }
                    }
                }
            }

            Rule::Date { set } => {
                let date = match data.value(key) {
                    Some(value) => value.to_date_with(&self.config.date_format)?,
                    None => None,
                };
                if date.is_none() && !property.is_nullable() {
                    return Err(data.missing(key));
                }
                if !set(instance, date) {
                    return Err(rejected());
                }
            }

            Rule::SimpleContent { hydrate, set } => {
                if !data.has_child(key) && !data.has_value(key) {
                    if property.is_nullable() {
                        return if set(instance, None) { Ok(()) } else { Err(rejected()) };
                    }
                    return Err(data.missing(key));
                }

                let empty;
                let (child, content) = match data.child(key) {
                    Some(child) => (child, child.get_value(CONTENT_KEY)?.to_string()),
                    None => {
                        empty = Data::create_empty(data, key);
                        (&empty, data.get_value(key)?.to_string())
                    }
                };

                let object = hydrate(self, child, content)?;
                if !set(instance, Some(object)) {
                    return Err(rejected());
                }
            }

            Rule::Complex { hydrate, set } => match data.child(key) {
                None if property.is_nullable() => {
                    if !set(instance, None) {
                        return Err(rejected());
                    }
                }
                None => return Err(data.missing(key)),
                Some(child) => {
                    let object = hydrate(self, child)?;
                    if !set(instance, Some(object)) {
                        return Err(rejected());
                    }
                }
            },

            Rule::Reference { accepts, set } => {
                let value = data.value(key).ok_or_else(|| DataError::MissingReferenceId {
                    path: data.path(),
                })?;
                let link = Link::new(value.to_string());
                set(instance, link.clone());
                self.deferred.push(Deferred {
                    link,
                    target_type: property.declared_type(),
                    accepts: *accepts,
                    path: value.location().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Runs the deferred resolutions once the outermost call has unwound.
    ///
    /// The identity table and the queue are taken out of the context first,
    /// so they are discarded on every path out of this function.
    fn complete<T>(&mut self, result: Result<Rc<T>, DataError>) -> Result<Rc<T>, DataError> {
        let identities = std::mem::take(&mut self.identities);
        let deferred = std::mem::take(&mut self.deferred);

        let root = result?;
        tracing::trace!(
            identities = identities.len(),
            references = deferred.len(),
            "Resolving deferred references"
        );
        for pending in deferred {
            pending.resolve(&identities)?;
        }
        Ok(root)
    }
}
