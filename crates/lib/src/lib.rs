//!
//! docbind: hydrate strongly-typed object graphs from generic document trees.
//! This library provides the components to read XML or JSON documents into a
//! located tree, build typed Rust values from it, and encode them back.
//!
//! ## Core Concepts
//!
//! * **Data (`data::Data`)**: An immutable, located view of one document element: attributes, child elements and text content, addressed with the `@name`/`name`/`#` key convention.
//! * **Values (`data::Value`)**: A scalar datum plus its location, with typed coercions that fail explicitly on malformed input.
//! * **Bindings (`binding::Bind`)**: Per-type metadata declaring, in order, which keys a type reads and how (primitive, date, simple content, complex, reference, collection).
//! * **Hydrator (`hydrator::Hydrator`)**: The engine that walks a `Data` tree guided by bindings and resolves identity references after traversal.
//! * **Sources (`source`)**: Parsers producing `Data` trees from XML and JSON text.
//! * **Encoding (`encode`)**: The reverse direction, from typed values back to JSON, `Data` and XML.
//!
//! ```rust
//! use std::rc::Rc;
//! use docbind::{Hydrator, binding::{Bind, Binding}, source};
//!
//! #[derive(Debug, Default)]
//! struct Note {
//!     lang: Option<String>,
//!     text: String,
//! }
//!
//! impl Bind for Note {
//!     const NAME: &'static str = "Note";
//!
//!     fn bind(binding: &mut Binding<Self>) {
//!         binding
//!             .optional_primitive("@lang", |note: &mut Note, lang| note.lang = lang)
//!             .primitive("#", |note: &mut Note, text| note.text = text);
//!     }
//! }
//!
//! let data = source::json::parse(r##"{ "Note": { "@lang": "cs", "#": "Zaplaceno" } }"##)?;
//! let note: Rc<Note> = Hydrator::new().hydrate(&data)?;
//! assert_eq!(note.lang.as_deref(), Some("cs"));
//! assert_eq!(note.text, "Zaplaceno");
//! # Ok::<(), docbind::Error>(())
//! ```

pub mod binding;
pub mod config;
pub mod constants;
pub mod data;
pub mod encode;
pub mod hydrator;
pub mod schema;
pub mod source;

pub use binding::{Bind, Binding, Ref, SimpleContent};
pub use config::HydratorConfig;
pub use data::{Data, DataError, Element, Value};
pub use hydrator::Hydrator;
pub use source::SourceError;

/// Result type used throughout the docbind library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Common error type for the docbind library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured data and hydration errors from the data module
    #[error(transparent)]
    Data(data::DataError),

    /// Structured parse/write errors from the source module
    #[error(transparent)]
    Source(source::SourceError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Data(_) => "data",
            Error::Source(_) => "source",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates required data was absent.
    pub fn is_missing_data(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_missing(),
            _ => false,
        }
    }

    /// Check if this error is a value coercion failure.
    pub fn is_format_error(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_format_error(),
            _ => false,
        }
    }

    /// Check if this error concerns identities or references.
    pub fn is_reference_error(&self) -> bool {
        match self {
            Error::Data(data_err) => data_err.is_reference_error(),
            _ => false,
        }
    }

    /// Check if this error came from parsing or writing a document.
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Source(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Source(source_err) => source_err.is_io_error(),
            _ => false,
        }
    }

    /// The document location the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Data(data_err) => data_err.path(),
            Error::Source(source_err) => source_err.path(),
            _ => None,
        }
    }
}
