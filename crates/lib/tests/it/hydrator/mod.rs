//! Hydration engine integration tests
//!
//! Tests are organized by concern: property rules, collections, identity
//! and reference resolution, failure handling, and the invoice schema.

mod collections;
mod failures;
mod helpers;
