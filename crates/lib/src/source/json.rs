//! JSON documents.
//!
//! A JSON document is an object with a single member naming the root
//! element:
//!
//! ```json
//! { "Invoice": { "@version": "6.0.1", "ID": "FV-1", "Note": ["a", "b"] } }
//! ```
//!
//! Numbers are kept as their textual form, booleans stay booleans and
//! `null` members are treated as absent.

use serde_json::Value as JsonValue;

use super::SourceError;
use crate::{
    constants::{ATTRIBUTE_PREFIX, CONTENT_KEY},
    data::{Data, Element, Raw},
};

/// Parses a JSON document.
pub fn parse(text: &str) -> Result<Data, SourceError> {
    let value: JsonValue = serde_json::from_str(text)?;
    from_document(&value)
}

/// Converts a parsed JSON document (single-member root object).
pub fn from_document(value: &JsonValue) -> Result<Data, SourceError> {
    match value {
        JsonValue::Object(map) if map.len() == 1 => {
            let (name, root) = map.iter().next().ok_or_else(|| malformed("/", "empty"))?;
            Ok(to_element(name, root)?.into_data())
        }
        _ => Err(malformed(
            "/",
            "expected an object with exactly one root member",
        )),
    }
}

/// Converts `value` into an element named `name`.
pub fn to_element(name: &str, value: &JsonValue) -> Result<Element, SourceError> {
    element(name, value, &format!("/{name}"))
}

fn element(name: &str, value: &JsonValue, path: &str) -> Result<Element, SourceError> {
    let mut element = Element::new(name);
    match value {
        JsonValue::Null => {}
        JsonValue::Array(_) => return Err(malformed(path, "arrays cannot be nested")),
        JsonValue::Object(map) => {
            for (key, member) in map {
                if member.is_null() {
                    continue;
                }
                let member_path = format!("{path}/{key}");
                if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                    element
                        .attributes
                        .push((attribute.to_string(), scalar(member, &member_path)?));
                } else if key == CONTENT_KEY {
                    element.content = Some(scalar(member, &member_path)?);
                } else if let JsonValue::Array(items) = member {
                    for (index, item) in items.iter().enumerate() {
                        let item_path = format!("{member_path}[{}]", index + 1);
                        element.children.push(self::element(key, item, &item_path)?);
                    }
                } else {
                    element.children.push(self::element(key, member, &member_path)?);
                }
            }
        }
        scalar_value => element.content = Some(scalar(scalar_value, path)?),
    }
    Ok(element)
}

fn scalar(value: &JsonValue, path: &str) -> Result<Raw, SourceError> {
    match value {
        JsonValue::String(s) => Ok(Raw::Text(s.clone())),
        JsonValue::Number(n) => Ok(Raw::Text(n.to_string())),
        JsonValue::Bool(b) => Ok(Raw::Bool(*b)),
        JsonValue::Null => Ok(Raw::Text(String::new())),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            Err(malformed(path, "attributes and content must be scalar"))
        }
    }
}

fn malformed(path: &str, reason: &str) -> SourceError {
    SourceError::Malformed {
        reason: reason.to_string(),
        path: path.to_string(),
    }
}
