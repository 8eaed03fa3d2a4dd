//! Error types for data access and hydration.
//!
//! Every variant that concerns a specific place in the document carries the
//! rendered location of that place, so callers can point at the offending
//! element or attribute.

use thiserror::Error;

/// Structured error types for reading and hydrating document data.
///
/// This enum covers the whole failure taxonomy of a hydration call: missing
/// data, values that cannot be coerced, identity/reference integrity problems
/// and binding metadata the engine cannot act on.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A required value or child element is absent
    #[error("Missing required child '{key}' at {path}")]
    MissingRequiredChild { key: String, path: String },

    /// A present value cannot be coerced to the declared type
    #[error("Invalid format at {path}: expected {expected}, found '{value}'")]
    InvalidFormat {
        expected: String,
        value: String,
        path: String,
    },

    /// A type name that no scalar coercion exists for
    #[error("Unsupported type: {name}")]
    UnsupportedType { name: String },

    /// Two nodes declared the same identity within one hydration call
    #[error("Duplicate identity '{id}' at {path}")]
    DuplicateIdentity { id: String, path: String },

    /// A node bound to a reference property carries no reference value
    #[error("Missing reference id at {path}")]
    MissingReferenceId { path: String },

    /// A reference points to an identity no node declared
    #[error("Referenced element '{id}' not found (referenced at {path})")]
    ReferencedElementNotFound { id: String, path: String },

    /// A reference resolved to an object of a different type than declared
    #[error("Referenced element '{id}' is not a {expected} (referenced at {path})")]
    ReferenceTypeMismatch {
        id: String,
        expected: String,
        path: String,
    },

    /// Nesting exceeded the configured depth limit
    #[error("Depth limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: String },

    /// Binding metadata describes something the engine cannot hydrate
    #[error("Unsupported binding metadata: {reason}")]
    UnsupportedMetadata { reason: String },
}

impl DataError {
    /// Check if this error indicates absent data
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            DataError::MissingRequiredChild { .. } | DataError::MissingReferenceId { .. }
        )
    }

    /// Check if this error is a coercion failure
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            DataError::InvalidFormat { .. } | DataError::UnsupportedType { .. }
        )
    }

    /// Check if this error concerns identities or references
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            DataError::DuplicateIdentity { .. }
                | DataError::MissingReferenceId { .. }
                | DataError::ReferencedElementNotFound { .. }
                | DataError::ReferenceTypeMismatch { .. }
        )
    }

    /// Check if this error comes from the binding metadata rather than the document
    pub fn is_metadata_error(&self) -> bool {
        matches!(self, DataError::UnsupportedMetadata { .. })
    }

    /// Get the document location if this error has one
    pub fn path(&self) -> Option<&str> {
        match self {
            DataError::MissingRequiredChild { path, .. }
            | DataError::InvalidFormat { path, .. }
            | DataError::DuplicateIdentity { path, .. }
            | DataError::MissingReferenceId { path }
            | DataError::ReferencedElementNotFound { path, .. }
            | DataError::ReferenceTypeMismatch { path, .. }
            | DataError::DepthLimitExceeded { path, .. } => Some(path),
            DataError::UnsupportedType { .. } | DataError::UnsupportedMetadata { .. } => None,
        }
    }

    /// Get the identity value if this is an identity/reference error
    pub fn id(&self) -> Option<&str> {
        match self {
            DataError::DuplicateIdentity { id, .. }
            | DataError::ReferencedElementNotFound { id, .. }
            | DataError::ReferenceTypeMismatch { id, .. } => Some(id),
            _ => None,
        }
    }
}

// Conversion from DataError to the main Error type
impl From<DataError> for crate::Error {
    fn from(err: DataError) -> Self {
        crate::Error::Data(err)
    }
}
