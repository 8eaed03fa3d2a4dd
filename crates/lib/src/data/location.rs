//! Document locations used in diagnostics.
//!
//! A [`Location`] records how a node or value was reached from the document
//! root. It renders as a slash separated path in the style of XPath:
//!
//! ```rust
//! # use docbind::data::Location;
//! let location = Location::root()
//!     .child("Invoice", None)
//!     .child("Payment", Some(2))
//!     .attribute("id");
//! assert_eq!(location.to_string(), "/Invoice/Payment[2]/@id");
//! ```

use std::fmt;

/// One step of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A child element, with its 1-based position among same-named siblings
    /// when that position is ambiguous.
    Element { name: String, index: Option<usize> },
    /// An attribute of the current element.
    Attribute(String),
    /// The text content of the current element.
    Content,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Element { name, index: None } => write!(f, "{name}"),
            Segment::Element {
                name,
                index: Some(index),
            } => write!(f, "{name}[{index}]"),
            Segment::Attribute(name) => write!(f, "@{name}"),
            Segment::Content => write!(f, "#"),
        }
    }
}

/// The location of a node or value inside a document.
///
/// Locations are cheap to extend: every method returns a new location and
/// leaves `self` untouched, so a parent can hand out child locations freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    segments: Vec<Segment>,
}

impl Location {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Location of a child element.
    pub fn child(&self, name: impl Into<String>, index: Option<usize>) -> Self {
        self.with(Segment::Element {
            name: name.into(),
            index,
        })
    }

    /// Location of an attribute of this element.
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with(Segment::Attribute(name.into()))
    }

    /// Location of this element's text content.
    pub fn content(&self) -> Self {
        self.with(Segment::Content)
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments from the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Iterate over the segments from the root.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
