//! Document sources: turning serialized documents into [`Data`] trees.
//!
//! Both formats share the key convention of [`crate::data`]. In JSON, keys
//! starting with `@` are attributes, `#` is the element's text content and
//! every other key is a child element (arrays repeat the child).
//!
//! [`Data`]: crate::data::Data

use std::path::Path;

use thiserror::Error;

use crate::data::Data;

pub mod json;
#[cfg(feature = "xml")]
pub mod xml;

/// Structured error types for reading and writing documents.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SourceError {
    /// The XML reader or writer failed
    #[cfg(feature = "xml")]
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The JSON text could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but does not describe an element tree
    #[error("Malformed document at {path}: {reason}")]
    Malformed { reason: String, path: String },

    /// Writing the document failed
    #[error("Failed to write document: {reason}")]
    Write { reason: String },

    /// The document file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The format could not be determined
    #[error("Unknown document format: {name}")]
    UnknownFormat { name: String },
}

impl SourceError {
    /// Check if this error comes from the document syntax
    pub fn is_syntax_error(&self) -> bool {
        match self {
            #[cfg(feature = "xml")]
            SourceError::Xml(_) => true,
            SourceError::Json(_) => true,
            _ => false,
        }
    }

    /// Check if this error is a structural problem of an otherwise valid document
    pub fn is_malformed(&self) -> bool {
        matches!(self, SourceError::Malformed { .. })
    }

    /// Check if this error is I/O related
    pub fn is_io_error(&self) -> bool {
        matches!(self, SourceError::Io(_))
    }

    /// Get the document location if this error has one
    pub fn path(&self) -> Option<&str> {
        match self {
            SourceError::Malformed { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from SourceError to the main Error type
impl From<SourceError> for crate::Error {
    fn from(err: SourceError) -> Self {
        crate::Error::Source(err)
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[cfg(feature = "xml")]
    Xml,
    Json,
}

impl Format {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            #[cfg(feature = "xml")]
            "xml" | "isdoc" => Ok(Format::Xml),
            "json" => Ok(Format::Json),
            _ => Err(SourceError::UnknownFormat {
                name: path.display().to_string(),
            }),
        }
    }

    /// Picks the format from the first non-whitespace character of a document.
    pub fn sniff(text: &str) -> Result<Self, SourceError> {
        match text.trim_start().chars().next() {
            #[cfg(feature = "xml")]
            Some('<') => Ok(Format::Xml),
            Some('{') => Ok(Format::Json),
            _ => Err(SourceError::UnknownFormat {
                name: text.chars().take(16).collect(),
            }),
        }
    }

    /// Parses `text` in this format.
    pub fn parse(self, text: &str) -> Result<Data, SourceError> {
        match self {
            #[cfg(feature = "xml")]
            Format::Xml => xml::parse(text),
            Format::Json => json::parse(text),
        }
    }
}

/// Reads and parses a document file, choosing the format by extension and
/// falling back to the content.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Data, SourceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let format = Format::from_path(path).or_else(|_| Format::sniff(&text))?;
    tracing::debug!(path = %path.display(), ?format, "Parsing document");
    format.parse(&text)
}
