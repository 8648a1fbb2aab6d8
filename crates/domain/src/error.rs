//! Domain error types.

/// Invariant violations raised while constructing domain values.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required command string is empty.
    #[error("{field} must not be empty")]
    EmptyCommand {
        /// Which command field was empty.
        field: &'static str,
    },

    /// `brightness_scale` must be at least 1.
    #[error("brightness_scale must be at least 1")]
    ZeroBrightnessScale,

    /// Light identifiers are lowercase slugs.
    #[error("invalid light id {id:?}: expected a lowercase slug")]
    InvalidLightId {
        /// The rejected identifier.
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_empty_command_error() {
        let err = ValidationError::EmptyCommand {
            field: "on_command",
        };
        assert_eq!(err.to_string(), "on_command must not be empty");
    }

    #[test]
    fn should_display_zero_scale_error() {
        assert_eq!(
            ValidationError::ZeroBrightnessScale.to_string(),
            "brightness_scale must be at least 1"
        );
    }

    #[test]
    fn should_display_invalid_id_error() {
        let err = ValidationError::InvalidLightId {
            id: "Bad Id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid light id \"Bad Id\": expected a lowercase slug"
        );
    }
}
