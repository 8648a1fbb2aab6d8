//! # cmdlight-adapter-template
//!
//! Value templates over JSON command output.
//!
//! A [`JsonPointerTemplate`] treats the raw captured string as a JSON
//! document and extracts the value at a configured [JSON pointer]
//! (RFC 6901). String values render without quotes; numbers, booleans, and
//! composites render in their JSON form. Anything that fails — invalid
//! JSON, missing pointer — is an extraction failure and leaves the
//! attribute at its previous value.
//!
//! [JSON pointer]: https://datatracker.ietf.org/doc/html/rfc6901
//!
//! ## Dependency rule
//!
//! Depends on `cmdlight-app` (port traits) only.

use cmdlight_app::ports::template::{RenderError, ValueRenderer};

/// Extracts the value at a JSON pointer from JSON command output.
#[derive(Debug, Clone)]
pub struct JsonPointerTemplate {
    pointer: String,
}

impl JsonPointerTemplate {
    /// Create a template for the given pointer (e.g. `/state/power`).
    ///
    /// A missing leading slash is added, so `state/power` works too; the
    /// empty pointer selects the whole document.
    #[must_use]
    pub fn new(pointer: impl Into<String>) -> Self {
        let pointer = pointer.into();
        let pointer = if pointer.is_empty() || pointer.starts_with('/') {
            pointer
        } else {
            format!("/{pointer}")
        };
        Self { pointer }
    }
}

impl ValueRenderer for JsonPointerTemplate {
    fn render(&self, raw: &str) -> Result<String, RenderError> {
        let document: serde_json::Value = serde_json::from_str(raw)
            .map_err(|error| RenderError::new(format!("output is not valid JSON: {error}")))?;
        let value = document
            .pointer(&self.pointer)
            .ok_or_else(|| RenderError::new(format!("no value at pointer {}", self.pointer)))?;
        Ok(match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extract_string_without_quotes() {
        let template = JsonPointerTemplate::new("/power");
        let value = template.render(r#"{"power": "true"}"#).unwrap();
        assert_eq!(value, "true");
    }

    #[test]
    fn should_extract_boolean_as_text() {
        let template = JsonPointerTemplate::new("/power");
        let value = template.render(r#"{"power": true}"#).unwrap();
        assert_eq!(value, "true");
    }

    #[test]
    fn should_extract_number_as_text() {
        let template = JsonPointerTemplate::new("/bri");
        let value = template.render(r#"{"bri": 128}"#).unwrap();
        assert_eq!(value, "128");
    }

    #[test]
    fn should_extract_nested_value() {
        let template = JsonPointerTemplate::new("/state/color");
        let value = template
            .render(r#"{"state": {"color": "255,0,0"}}"#)
            .unwrap();
        assert_eq!(value, "255,0,0");
    }

    #[test]
    fn should_add_missing_leading_slash() {
        let template = JsonPointerTemplate::new("power");
        let value = template.render(r#"{"power": "on"}"#).unwrap();
        assert_eq!(value, "on");
    }

    #[test]
    fn should_select_whole_document_with_empty_pointer() {
        let template = JsonPointerTemplate::new("");
        let value = template.render("\"true\"").unwrap();
        assert_eq!(value, "true");
    }

    #[test]
    fn should_fail_on_invalid_json() {
        let template = JsonPointerTemplate::new("/power");
        let result = template.render("not json");
        assert!(result.is_err());
    }

    #[test]
    fn should_fail_on_missing_pointer() {
        let template = JsonPointerTemplate::new("/missing");
        let result = template.render(r#"{"power": true}"#);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("no value at pointer /missing")
        );
    }
}
