//! Binding metadata: how a Rust type maps onto document data.
//!
//! A hydratable type implements [`Bind`] and declares, in order, the
//! properties it reads from a node. Each declaration names the map key the
//! value is found under, whether the property may be absent, and a setter.
//!
//! ```rust
//! use std::rc::Rc;
//! use docbind::binding::{Bind, Binding};
//!
//! #[derive(Debug, Default)]
//! struct Party {
//!     name: String,
//!     vat_id: Option<String>,
//! }
//!
//! impl Bind for Party {
//!     const NAME: &'static str = "Party";
//!
//!     fn bind(binding: &mut Binding<Self>) {
//!         binding
//!             .primitive("Name", |party: &mut Party, name| party.name = name)
//!             .optional_primitive("VATID", |party: &mut Party, id| party.vat_id = id);
//!     }
//! }
//! ```
//!
//! The hydrator never inspects types at runtime; the closed [`PropertyKind`]
//! of each declaration selects the hydration rule.

use std::{any::Any, fmt, rc::Rc};

use chrono::NaiveDate;

use crate::{
    data::{Data, DataError, Primitive, Scalar, ScalarType},
    hydrator::HydrationContext,
};

pub mod reference;
pub mod reflector;

pub use reference::Ref;
pub use reflector::Reflector;

pub(crate) use reference::Link;

/// A hydrated object with its type erased.
pub type Object = Rc<dyn Any>;

/// Types the hydrator can construct.
///
/// Instances start from [`Default`] and are filled in by the setters
/// declared in [`Bind::bind`].
pub trait Bind: Default + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Declares this type's properties on `binding`.
    fn bind(binding: &mut Binding<Self>);
}

/// Types that are a scalar value carrying further attributes, such as an
/// amount with a currency.
pub trait SimpleContent: Bind {
    /// Receives the textual content of the element.
    fn set_content(&mut self, content: String);
}

/// Which hydration rule a property follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Primitive,
    Date,
    SimpleContent,
    Complex,
    Reference,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Primitive => "primitive",
            PropertyKind::Date => "date",
            PropertyKind::SimpleContent => "simple content",
            PropertyKind::Complex => "complex",
            PropertyKind::Reference => "reference",
        };
        f.write_str(name)
    }
}

pub(crate) type HydrateFn = fn(&mut HydrationContext<'_>, &Data) -> Result<Object, DataError>;
pub(crate) type HydrateContentFn =
    fn(&mut HydrationContext<'_>, &Data, String) -> Result<Object, DataError>;
pub(crate) type ObjectSetter<T> = Box<dyn Fn(&mut T, Option<Object>) -> bool>;

/// Kind-specific payload of a property. Setters return `false` when handed a
/// value they cannot accept.
pub(crate) enum Rule<T> {
    Primitive {
        ty: ScalarType,
        set: Box<dyn Fn(&mut T, Option<Scalar>) -> bool>,
    },
    Date {
        set: Box<dyn Fn(&mut T, Option<NaiveDate>) -> bool>,
    },
    SimpleContent {
        hydrate: HydrateContentFn,
        set: ObjectSetter<T>,
    },
    Complex {
        hydrate: HydrateFn,
        set: ObjectSetter<T>,
    },
    Reference {
        accepts: fn(&dyn Any) -> bool,
        set: Box<dyn Fn(&mut T, Link)>,
    },
}

/// One declared property of a bound type.
pub struct Property<T> {
    key: String,
    nullable: bool,
    declared_type: &'static str,
    pub(crate) rule: Rule<T>,
}

impl<T> Property<T> {
    /// The map key the property's data is looked up under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the property may be absent.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Name of the declared value type.
    pub fn declared_type(&self) -> &'static str {
        self.declared_type
    }

    /// The hydration rule this property follows.
    pub fn kind(&self) -> PropertyKind {
        match self.rule {
            Rule::Primitive { .. } => PropertyKind::Primitive,
            Rule::Date { .. } => PropertyKind::Date,
            Rule::SimpleContent { .. } => PropertyKind::SimpleContent,
            Rule::Complex { .. } => PropertyKind::Complex,
            Rule::Reference { .. } => PropertyKind::Reference,
        }
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .field("declared_type", &self.declared_type)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// The collection contract: ordered append of typed items found under an
/// item key.
pub struct Collection<T> {
    item_key: String,
    item_type: &'static str,
    pub(crate) hydrate: HydrateFn,
    pub(crate) append: ObjectSetter<T>,
}

impl<T> Collection<T> {
    /// The map key of the item elements.
    pub fn item_key(&self) -> &str {
        &self.item_key
    }

    /// Name of the item type.
    pub fn item_type(&self) -> &'static str {
        self.item_type
    }
}

/// Ordered binding metadata for one type.
pub struct Binding<T> {
    type_name: &'static str,
    properties: Vec<Property<T>>,
    collection: Option<Collection<T>>,
}

impl<T: 'static> Binding<T> {
    /// Creates an empty binding.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            properties: Vec::new(),
            collection: None,
        }
    }

    /// Name of the bound type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }

    /// The collection contract, if the type declared one.
    pub fn collection_contract(&self) -> Option<&Collection<T>> {
        self.collection.as_ref()
    }

    fn push(
        &mut self,
        key: &str,
        nullable: bool,
        declared_type: &'static str,
        rule: Rule<T>,
    ) -> &mut Self {
        self.properties.push(Property {
            key: key.to_string(),
            nullable,
            declared_type,
            rule,
        });
        self
    }

    /// A required scalar value.
    pub fn primitive<V, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        V: Primitive,
        F: Fn(&mut T, V) + 'static,
    {
        let rule = Rule::Primitive {
            ty: V::TYPE,
            set: Box::new(move |target, scalar| match scalar.and_then(V::from_scalar) {
                Some(value) => {
                    set(target, value);
                    true
                }
                None => false,
            }),
        };
        self.push(key, false, V::TYPE.name(), rule)
    }

    /// An optional scalar value; absent or empty values set `None`.
    pub fn optional_primitive<V, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        V: Primitive,
        F: Fn(&mut T, Option<V>) + 'static,
    {
        let rule = Rule::Primitive {
            ty: V::TYPE,
            set: Box::new(move |target, scalar| match scalar {
                None => {
                    set(target, None);
                    true
                }
                Some(scalar) => match V::from_scalar(scalar) {
                    Some(value) => {
                        set(target, Some(value));
                        true
                    }
                    None => false,
                },
            }),
        };
        self.push(key, true, V::TYPE.name(), rule)
    }

    /// A required date.
    pub fn date<F>(&mut self, key: &str, set: F) -> &mut Self
    where
        F: Fn(&mut T, NaiveDate) + 'static,
    {
        let rule = Rule::Date {
            set: Box::new(move |target, date| match date {
                Some(date) => {
                    set(target, date);
                    true
                }
                None => false,
            }),
        };
        self.push(key, false, "date", rule)
    }

    /// An optional date; absent or empty values set `None`.
    pub fn optional_date<F>(&mut self, key: &str, set: F) -> &mut Self
    where
        F: Fn(&mut T, Option<NaiveDate>) + 'static,
    {
        let rule = Rule::Date {
            set: Box::new(move |target, date| {
                set(target, date);
                true
            }),
        };
        self.push(key, true, "date", rule)
    }

    /// A required simple-content element, given either as an element or as
    /// a flat value.
    pub fn simple_content<U, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        U: SimpleContent,
        F: Fn(&mut T, Rc<U>) + 'static,
    {
        let rule = Rule::SimpleContent {
            hydrate: hydrate_with_content::<U>,
            set: required_setter(set),
        };
        self.push(key, false, U::NAME, rule)
    }

    /// An optional simple-content element.
    pub fn optional_simple_content<U, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        U: SimpleContent,
        F: Fn(&mut T, Option<Rc<U>>) + 'static,
    {
        let rule = Rule::SimpleContent {
            hydrate: hydrate_with_content::<U>,
            set: optional_setter(set),
        };
        self.push(key, true, U::NAME, rule)
    }

    /// A required nested object.
    pub fn complex<U, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        U: Bind,
        F: Fn(&mut T, Rc<U>) + 'static,
    {
        let rule = Rule::Complex {
            hydrate: hydrate_object::<U>,
            set: required_setter(set),
        };
        self.push(key, false, U::NAME, rule)
    }

    /// An optional nested object.
    pub fn optional_complex<U, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        U: Bind,
        F: Fn(&mut T, Option<Rc<U>>) + 'static,
    {
        let rule = Rule::Complex {
            hydrate: hydrate_object::<U>,
            set: optional_setter(set),
        };
        self.push(key, true, U::NAME, rule)
    }

    /// A reference to an object declaring the identity found under `key`
    /// on the node itself (typically `@ref`). Resolved after traversal.
    pub fn reference<U, F>(&mut self, key: &str, set: F) -> &mut Self
    where
        U: Bind,
        F: Fn(&mut T, Ref<U>) + 'static,
    {
        let rule = Rule::Reference {
            accepts: is_type::<U>,
            set: Box::new(move |target, link| set(target, Ref::from_link(link))),
        };
        self.push(key, false, U::NAME, rule)
    }

    /// Declares the collection contract: every child element under
    /// `item_key` is hydrated as `I` and appended in document order.
    ///
    /// Declaring a collection twice replaces the earlier declaration.
    pub fn collection<I, F>(&mut self, item_key: &str, append: F) -> &mut Self
    where
        I: Bind,
        F: Fn(&mut T, Rc<I>) + 'static,
    {
        self.collection = Some(Collection {
            item_key: item_key.to_string(),
            item_type: I::NAME,
            hydrate: hydrate_object::<I>,
            append: required_setter(append),
        });
        self
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .field(
                "collection",
                &self.collection.as_ref().map(|c| (&c.item_key, c.item_type)),
            )
            .finish()
    }
}

fn required_setter<T, U, F>(set: F) -> ObjectSetter<T>
where
    U: 'static,
    F: Fn(&mut T, Rc<U>) + 'static,
{
    Box::new(move |target, object| match object.map(|o| o.downcast::<U>()) {
        Some(Ok(value)) => {
            set(target, value);
            true
        }
        _ => false,
    })
}

fn optional_setter<T, U, F>(set: F) -> ObjectSetter<T>
where
    U: 'static,
    F: Fn(&mut T, Option<Rc<U>>) + 'static,
{
    Box::new(move |target, object| match object.map(|o| o.downcast::<U>()) {
        None => {
            set(target, None);
            true
        }
        Some(Ok(value)) => {
            set(target, Some(value));
            true
        }
        Some(Err(_)) => false,
    })
}

fn hydrate_object<U: Bind>(
    context: &mut HydrationContext<'_>,
    data: &Data,
) -> Result<Object, DataError> {
    let object: Object = context.hydrate::<U>(data)?;
    Ok(object)
}

fn hydrate_with_content<U: SimpleContent>(
    context: &mut HydrationContext<'_>,
    data: &Data,
    content: String,
) -> Result<Object, DataError> {
    let object: Object =
        context.hydrate_then::<U, _>(data, move |value| value.set_content(content))?;
    Ok(object)
}

fn is_type<U: 'static>(object: &dyn Any) -> bool {
    object.is::<U>()
}
