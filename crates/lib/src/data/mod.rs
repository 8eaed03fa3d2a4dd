//! The generic document tree consumed by hydration.
//!
//! Sources (XML, JSON, or hand-built [`Element`]s in tests) describe a
//! document as a tree of elements. Converting an [`Element`] into a [`Data`]
//! node fixes every node's [`Location`] and indexes attributes and children
//! by name; after that the tree is read-only.
//!
//! # Key convention
//!
//! All lookups take a single string key:
//!
//! - `@name` addresses an attribute,
//! - `#` addresses the node's own text content,
//! - any other key addresses child elements.
//!
//! A child element without attributes or child elements of its own is a
//! *flat leaf*: it is visible both as a child and as a value.

use std::collections::BTreeMap;

pub mod errors;
pub mod location;
pub mod value;

pub use errors::DataError;
pub use location::{Location, Segment};
pub use value::{Primitive, Raw, Scalar, ScalarType, Value};

use crate::constants::{ATTRIBUTE_PREFIX, CONTENT_KEY};

/// Owned, order-preserving description of a document element.
///
/// This is the form sources produce and encoders consume. Call
/// [`Element::into_data`] to obtain the located, indexed [`Data`] view.
///
/// ```rust
/// # use docbind::data::Element;
/// let data = Element::new("Invoice")
///     .attribute("id", "A")
///     .child(Element::new("Note").text("paid"))
///     .into_data();
///
/// assert!(data.has_value("@id"));
/// assert_eq!(data.get_value("Note").unwrap().to_string(), "paid");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, Raw)>,
    pub children: Vec<Element>,
    pub content: Option<Raw>,
}

impl Element {
    /// Creates an element with no attributes, children or content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a text attribute (the name is given without `@`).
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), Raw::Text(value.into())));
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(Raw::Text(text.into()));
        self
    }

    /// Sets a native boolean content.
    pub fn bool(mut self, value: bool) -> Self {
        self.content = Some(Raw::Bool(value));
        self
    }

    /// Returns true if the element has neither attributes nor child elements.
    pub fn is_flat(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Converts this element into a root [`Data`] node.
    pub fn into_data(self) -> Data {
        let location = Location::root().child(self.name.clone(), None);
        Data::from_element(self, location)
    }
}

/// Immutable, located view over one document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    name: String,
    location: Location,
    attributes: BTreeMap<String, Value>,
    children: BTreeMap<String, Vec<Data>>,
    content: Option<Value>,
}

impl Data {
    fn from_element(element: Element, location: Location) -> Self {
        let flat = element.is_flat();

        let attributes = element
            .attributes
            .into_iter()
            .map(|(name, raw)| {
                let value = make_value(raw, location.attribute(name.clone()));
                (name, value)
            })
            .collect();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for child in &element.children {
            *counts.entry(child.name.as_str()).or_default() += 1;
        }
        let counts: BTreeMap<String, usize> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();

        let mut children: BTreeMap<String, Vec<Data>> = BTreeMap::new();
        for child in element.children {
            let siblings = children.entry(child.name.clone()).or_default();
            let index = (counts[&child.name] > 1).then_some(siblings.len() + 1);
            let child_location = location.child(child.name.clone(), index);
            siblings.push(Data::from_element(child, child_location));
        }

        // A flat leaf always has a value, even when the element is empty
        let content = match (element.content, flat) {
            (Some(raw), true) => Some(make_value(raw, location.clone())),
            (Some(raw), false) => Some(make_value(raw, location.content())),
            (None, true) => Some(Value::text("", location.clone())),
            (None, false) => None,
        };

        Self {
            name: element.name,
            location,
            attributes,
            children,
            content,
        }
    }

    /// Synthesizes an empty node standing in for `key` under `parent`.
    ///
    /// Used when a simple-content element is represented only by a flat
    /// value, so there is no element node to hydrate.
    pub fn create_empty(parent: &Data, key: &str) -> Data {
        Self {
            name: key.trim_start_matches(ATTRIBUTE_PREFIX).to_string(),
            location: parent.location_of(key),
            attributes: BTreeMap::new(),
            children: BTreeMap::new(),
            content: None,
        }
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location of this node, for diagnostics.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Shorthand for the rendered location.
    pub fn path(&self) -> String {
        self.location.to_string()
    }

    /// All attributes by name (without `@`).
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// All child elements grouped by name, each group in document order.
    pub fn children(&self) -> &BTreeMap<String, Vec<Data>> {
        &self.children
    }

    /// The node's own text content.
    pub fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    /// Returns true if this node has no attributes and no child elements.
    pub fn is_flat(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Looks up a value without failing.
    pub fn value(&self, key: &str) -> Option<&Value> {
        if key == CONTENT_KEY {
            return self.content.as_ref();
        }
        if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            return self.attributes.get(name);
        }
        match self.children.get(key).map(Vec::as_slice) {
            Some([leaf]) if leaf.is_flat() => leaf.content.as_ref(),
            _ => None,
        }
    }

    /// Returns true if a value exists under `key`.
    pub fn has_value(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Returns the value under `key`, failing if it is absent.
    pub fn get_value(&self, key: &str) -> Result<&Value, DataError> {
        self.value(key).ok_or_else(|| self.missing(key))
    }

    /// Looks up the first child element named `key` without failing.
    pub fn child(&self, key: &str) -> Option<&Data> {
        if key == CONTENT_KEY || key.starts_with(ATTRIBUTE_PREFIX) {
            return None;
        }
        self.children.get(key).and_then(|list| list.first())
    }

    /// Returns true if at least one child element named `key` exists.
    pub fn has_child(&self, key: &str) -> bool {
        self.child(key).is_some()
    }

    /// Returns the first child element named `key`, failing if there is none.
    pub fn get_child(&self, key: &str) -> Result<&Data, DataError> {
        self.child(key).ok_or_else(|| self.missing(key))
    }

    /// Where the data under `key` is, or would be, located.
    pub fn location_of(&self, key: &str) -> Location {
        if key == CONTENT_KEY {
            return self.location.content();
        }
        match key.strip_prefix(ATTRIBUTE_PREFIX) {
            Some(name) => self.location.attribute(name),
            None => self.location.child(key, None),
        }
    }

    /// A [`DataError::MissingRequiredChild`] for `key` under this node.
    pub fn missing(&self, key: &str) -> DataError {
        DataError::MissingRequiredChild {
            key: key.to_string(),
            path: self.location_of(key).to_string(),
        }
    }

    /// Returns every child element named `key` in document order.
    ///
    /// An absent key yields an empty slice.
    pub fn get_child_list(&self, key: &str) -> &[Data] {
        self.children.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn make_value(raw: Raw, location: Location) -> Value {
    match raw {
        Raw::Text(text) => Value::text(text, location),
        Raw::Bool(b) => Value::bool(b, location),
    }
}
