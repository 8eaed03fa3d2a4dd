//! Hydrator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    constants::{DEFAULT_DATE_FORMAT, DEFAULT_IDENTITY_KEY, DEFAULT_MAX_DEPTH},
};

/// Settings shared by every hydration call of a [`crate::Hydrator`].
///
/// Missing fields in a configuration file fall back to their defaults:
///
/// ```rust
/// # use docbind::HydratorConfig;
/// let config: HydratorConfig = serde_json::from_str(r#"{ "max_depth": 8 }"#)?;
/// assert_eq!(config.max_depth, 8);
/// assert_eq!(config.identity_key, "@id");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydratorConfig {
    /// Value key whose presence on a node registers that node's identity.
    pub identity_key: String,
    /// Maximum nesting of hydrated objects.
    pub max_depth: usize,
    /// chrono format used for date properties.
    pub date_format: String,
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self {
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl HydratorConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = key.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}
