//! Encoding typed values back into documents.
//!
//! Values are serialized with serde into a JSON value first. That value
//! follows the same key convention the sources read, so it converts into an
//! [`Element`] tree the same way a parsed JSON document does, and from there
//! into a [`Data`] tree or an XML document.
//!
//! ```rust
//! use docbind::{encode, schema::Amount};
//!
//! let amount = Amount { currency: Some("EUR".into()), value: "12.50".into() };
//! let data = encode::to_data(&amount, "PaidAmount")?;
//! assert_eq!(data.get_value("@currencyID")?.to_string(), "EUR");
//! assert_eq!(data.get_value("#")?.to_string(), "12.50");
//! # Ok::<(), docbind::Error>(())
//! ```

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    Result,
    data::{Data, Element},
    source::{SourceError, json},
};

/// Serializes `value` into a JSON value using the key convention.
pub fn to_value<T: Serialize>(value: &T) -> Result<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

/// Serializes `value` into an element tree rooted at `root`.
pub fn to_element<T: Serialize>(value: &T, root: &str) -> Result<Element> {
    let value = to_value(value)?;
    match &value {
        JsonValue::Array(_) => Err(SourceError::Malformed {
            reason: "a sequence cannot be a document root".to_string(),
            path: format!("/{root}"),
        }
        .into()),
        _ => Ok(json::to_element(root, &value)?),
    }
}

/// Serializes `value` into a located data tree rooted at `root`.
pub fn to_data<T: Serialize>(value: &T, root: &str) -> Result<Data> {
    Ok(to_element(value, root)?.into_data())
}

/// Serializes `value` into an indented XML document rooted at `root`.
#[cfg(feature = "xml")]
pub fn to_xml<T: Serialize>(value: &T, root: &str) -> Result<String> {
    let element = to_element(value, root)?;
    tracing::debug!(root, "Writing XML document");
    Ok(crate::source::xml::write(&element)?)
}

/// Serializes `value` into a pretty-printed JSON document rooted at `root`.
pub fn to_json<T: Serialize>(value: &T, root: &str) -> Result<String> {
    let mut document = serde_json::Map::new();
    document.insert(root.to_string(), to_value(value)?);
    Ok(serde_json::to_string_pretty(&document)?)
}
