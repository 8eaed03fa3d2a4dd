//! Constants used throughout the docbind library.
//!
//! This module provides central definitions for the reserved keys of the
//! document key convention and the defaults of [`crate::HydratorConfig`].

/// Prefix marking an attribute key, e.g. `@id`.
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Key addressing a node's own text content.
pub const CONTENT_KEY: &str = "#";

/// Default key whose presence registers a node's identity.
pub const DEFAULT_IDENTITY_KEY: &str = "@id";

/// Default key a reference property reads the referenced identity from.
pub const DEFAULT_REFERENCE_KEY: &str = "@ref";

/// Default chrono format for date values.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default limit on nested hydration calls.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Deepest element nesting the XML source accepts.
pub const MAX_DOCUMENT_NESTING: usize = 256;
