//! Value template port — user-supplied transforms over raw command output.
//!
//! A renderer receives the raw captured string (it may internally treat it
//! as JSON) and returns the canonical textual value. Render failures are
//! extraction failures: the affected attribute keeps its previous value.

/// A template failed to produce a value from the raw output.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct RenderError {
    reason: String,
}

impl RenderError {
    /// Wrap a renderer-specific failure description.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Transforms raw command output into a canonical attribute value.
pub trait ValueRenderer: Send + Sync {
    /// Render `raw` into the canonical textual value.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the raw value cannot be transformed.
    fn render(&self, raw: &str) -> Result<String, RenderError>;
}

/// Renderer that returns the raw value unchanged.
///
/// Stands in for "no template configured" wherever a concrete renderer type
/// is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl ValueRenderer for Passthrough {
    fn render(&self, raw: &str) -> Result<String, RenderError> {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pass_raw_value_through() {
        assert_eq!(Passthrough.render("true").unwrap(), "true");
    }

    #[test]
    fn should_display_render_error_reason() {
        let err = RenderError::new("no value at pointer /power");
        assert_eq!(err.to_string(), "no value at pointer /power");
    }
}
