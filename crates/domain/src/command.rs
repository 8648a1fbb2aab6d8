//! Command specification — which shell commands drive a light.
//!
//! Immutable after construction. Presence of the optional state commands
//! determines the light's capabilities and whether its power state is
//! assumed (optimistic) or polled (authoritative).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::features::LightFeatures;

/// Default brightness domain upper bound.
pub const DEFAULT_BRIGHTNESS_SCALE: u16 = 255;

/// The `true` shell builtin: succeeds without doing anything.
const NOOP_COMMAND: &str = "true";

/// The set of shell commands configured for one light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command that turns the light on.
    pub on_command: String,
    /// Command that turns the light off.
    pub off_command: String,
    /// Command whose output (or exit code) reports the power state.
    pub state_command: Option<String>,
    /// Command whose output reports the brightness.
    pub brightness_state_command: Option<String>,
    /// Command whose output reports the color as `r,g,b`.
    pub rgb_state_command: Option<String>,
    /// Upper bound of the brightness domain, at least 1.
    pub brightness_scale: u16,
}

impl CommandSpec {
    /// Create a builder for constructing a [`CommandSpec`].
    #[must_use]
    pub fn builder() -> CommandSpecBuilder {
        CommandSpecBuilder::default()
    }

    /// Whether power state is assumed from command success rather than
    /// measured: true iff no state command is configured.
    #[must_use]
    pub fn assumed_state(&self) -> bool {
        self.state_command.is_none()
    }

    /// Whether the light should be polled: true iff a state command is
    /// configured.
    #[must_use]
    pub fn should_poll(&self) -> bool {
        self.state_command.is_some()
    }

    /// Capabilities implied by the configured commands.
    ///
    /// Brightness and color require their respective state commands;
    /// effects need nothing beyond the on command.
    #[must_use]
    pub fn features(&self) -> LightFeatures {
        LightFeatures {
            brightness: self.brightness_state_command.is_some(),
            rgb_color: self.rgb_state_command.is_some(),
            effect: true,
            flash: false,
            transition: false,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCommand`] when `on_command` or
    /// `off_command` is empty, and [`ValidationError::ZeroBrightnessScale`]
    /// when the scale is 0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.on_command.is_empty() {
            return Err(ValidationError::EmptyCommand {
                field: "on_command",
            });
        }
        if self.off_command.is_empty() {
            return Err(ValidationError::EmptyCommand {
                field: "off_command",
            });
        }
        if self.brightness_scale == 0 {
            return Err(ValidationError::ZeroBrightnessScale);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`CommandSpec`].
#[derive(Debug, Default)]
pub struct CommandSpecBuilder {
    on_command: Option<String>,
    off_command: Option<String>,
    state_command: Option<String>,
    brightness_state_command: Option<String>,
    rgb_state_command: Option<String>,
    brightness_scale: Option<u16>,
}

impl CommandSpecBuilder {
    #[must_use]
    pub fn on_command(mut self, command: impl Into<String>) -> Self {
        self.on_command = Some(command.into());
        self
    }

    #[must_use]
    pub fn off_command(mut self, command: impl Into<String>) -> Self {
        self.off_command = Some(command.into());
        self
    }

    #[must_use]
    pub fn state_command(mut self, command: impl Into<String>) -> Self {
        self.state_command = Some(command.into());
        self
    }

    #[must_use]
    pub fn brightness_state_command(mut self, command: impl Into<String>) -> Self {
        self.brightness_state_command = Some(command.into());
        self
    }

    #[must_use]
    pub fn rgb_state_command(mut self, command: impl Into<String>) -> Self {
        self.rgb_state_command = Some(command.into());
        self
    }

    #[must_use]
    pub fn brightness_scale(mut self, scale: u16) -> Self {
        self.brightness_scale = Some(scale);
        self
    }

    /// Consume the builder, validate, and return a [`CommandSpec`].
    ///
    /// The on and off commands default to the `true` builtin, the scale to
    /// 255.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a provided command is empty or the
    /// scale is 0.
    pub fn build(self) -> Result<CommandSpec, ValidationError> {
        let spec = CommandSpec {
            on_command: self.on_command.unwrap_or_else(|| NOOP_COMMAND.to_string()),
            off_command: self.off_command.unwrap_or_else(|| NOOP_COMMAND.to_string()),
            state_command: self.state_command,
            brightness_state_command: self.brightness_state_command,
            rgb_state_command: self.rgb_state_command,
            brightness_scale: self.brightness_scale.unwrap_or(DEFAULT_BRIGHTNESS_SCALE),
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_commands_to_noop_and_scale_to_255() {
        let spec = CommandSpec::builder().build().unwrap();
        assert_eq!(spec.on_command, "true");
        assert_eq!(spec.off_command, "true");
        assert_eq!(spec.brightness_scale, 255);
        assert!(spec.state_command.is_none());
    }

    #[test]
    fn should_assume_state_without_state_command() {
        let spec = CommandSpec::builder().build().unwrap();
        assert!(spec.assumed_state());
        assert!(!spec.should_poll());
    }

    #[test]
    fn should_poll_with_state_command() {
        let spec = CommandSpec::builder()
            .state_command("light-client --status")
            .build()
            .unwrap();
        assert!(!spec.assumed_state());
        assert!(spec.should_poll());
    }

    #[test]
    fn should_derive_features_from_configured_commands() {
        let spec = CommandSpec::builder()
            .brightness_state_command("light-client --bri")
            .build()
            .unwrap();
        let features = spec.features();
        assert!(features.brightness);
        assert!(!features.rgb_color);
        assert!(features.effect);
        assert!(!features.flash);
        assert!(!features.transition);
    }

    #[test]
    fn should_support_rgb_with_rgb_state_command() {
        let spec = CommandSpec::builder()
            .rgb_state_command("light-client --rgb")
            .build()
            .unwrap();
        assert!(spec.features().rgb_color);
    }

    #[test]
    fn should_reject_zero_brightness_scale() {
        let result = CommandSpec::builder().brightness_scale(0).build();
        assert_eq!(result, Err(ValidationError::ZeroBrightnessScale));
    }

    #[test]
    fn should_reject_empty_on_command() {
        let result = CommandSpec::builder().on_command("").build();
        assert_eq!(
            result,
            Err(ValidationError::EmptyCommand {
                field: "on_command"
            })
        );
    }

    #[test]
    fn should_reject_empty_off_command() {
        let result = CommandSpec::builder().off_command("").build();
        assert_eq!(
            result,
            Err(ValidationError::EmptyCommand {
                field: "off_command"
            })
        );
    }

    #[test]
    fn should_accept_custom_scale() {
        let spec = CommandSpec::builder().brightness_scale(100).build().unwrap();
        assert_eq!(spec.brightness_scale, 100);
    }
}
