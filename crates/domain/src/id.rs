//! Light identifiers — configuration slugs with identity semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a configured light.
///
/// Comes from the configuration table key (e.g. `bedroom_strip`), so it is
/// restricted to lowercase ASCII letters, digits, and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(String);

impl LightId {
    /// Validate and wrap a configuration slug.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLightId`] when `slug` is empty or
    /// contains anything but lowercase ASCII letters, digits, and
    /// underscores.
    pub fn new(slug: impl Into<String>) -> Result<Self, ValidationError> {
        let slug = slug.into();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if valid {
            Ok(Self(slug))
        } else {
            Err(ValidationError::InvalidLightId { id: slug })
        }
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LightId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
