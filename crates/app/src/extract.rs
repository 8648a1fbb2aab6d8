//! Turning raw command output into canonical attribute values.
//!
//! Raw output first goes through the configured template (if any), then is
//! parsed into the attribute's type. Every failure is recoverable: the
//! caller logs it and leaves the attribute at its previous value.

use cmdlight_domain::color::{ParseColorError, Rgb};

use crate::ports::template::{RenderError, ValueRenderer};

/// Why a raw value could not be turned into an attribute value.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The configured template failed to render.
    #[error("template rendering failed: {0}")]
    Render(#[from] RenderError),

    /// The value is neither `"true"` nor `"false"` (case-insensitive).
    #[error("expected \"true\" or \"false\", got {value:?}")]
    Bool {
        /// The offending value.
        value: String,
    },

    /// The value is not an unsigned integer.
    #[error("invalid integer value")]
    Int(#[from] std::num::ParseIntError),

    /// The value is not an `r,g,b` color.
    #[error("invalid color value")]
    Rgb(#[from] ParseColorError),
}

/// Canonicalizes raw command output, optionally through a template.
#[derive(Debug)]
pub struct ValueExtractor<R> {
    template: Option<R>,
}

impl<R> ValueExtractor<R> {
    /// Build an extractor with an optional template.
    #[must_use]
    pub fn new(template: Option<R>) -> Self {
        Self { template }
    }

    /// Whether a template is configured.
    ///
    /// Decides how the power state is queried: with a template the state
    /// command's output is captured, without one only its exit code counts.
    #[must_use]
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }
}

impl<R: ValueRenderer> ValueExtractor<R> {
    /// Canonicalize `raw`: render it through the template when one is
    /// configured, otherwise return it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Render`] when the template fails.
    pub fn extract(&self, raw: &str) -> Result<String, ExtractError> {
        match &self.template {
            Some(template) => Ok(template.render(raw)?),
            None => Ok(raw.to_string()),
        }
    }

    /// Canonical power-state test: `"true"` (any case) is on, `"false"`
    /// (any case) is off.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Bool`] for any other value, so that an
    /// unparseable payload leaves the previous state untouched.
    pub fn extract_bool(&self, raw: &str) -> Result<bool, ExtractError> {
        let value = self.extract(raw)?;
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ExtractError::Bool { value })
        }
    }

    /// Parse a brightness value, clamped into `[0, scale]`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Int`] when the value is not an unsigned
    /// integer.
    pub fn extract_brightness(&self, raw: &str, scale: u16) -> Result<u16, ExtractError> {
        let value: u16 = self.extract(raw)?.trim().parse()?;
        Ok(value.min(scale))
    }

    /// Parse an `r,g,b` color value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Rgb`] when the value is not three
    /// comma-separated 0–255 integers.
    pub fn extract_rgb(&self, raw: &str) -> Result<Rgb, ExtractError> {
        Ok(self.extract(raw)?.parse()?)
    }
}
