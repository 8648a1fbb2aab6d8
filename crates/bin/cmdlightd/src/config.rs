//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `cmdlight.toml` in the working directory. Every field has a
//! default except the lights table, which must name at least one light.
//! Environment variables take precedence over file values.

use std::collections::BTreeMap;

use serde::Deserialize;

use cmdlight_app::reconciler::ValueTemplates;
use cmdlight_adapter_template::JsonPointerTemplate;
use cmdlight_domain::command::{CommandSpec, DEFAULT_BRIGHTNESS_SCALE};
use cmdlight_domain::error::ValidationError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Poll scheduler settings.
    pub poll: PollConfig,
    /// Effect engine settings.
    pub effects: EffectsConfig,
    /// Configured lights, keyed by slug.
    pub lights: BTreeMap<String, LightConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Poll scheduler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between state polls for lights with a state command.
    pub interval_secs: u64,
}

/// Effect engine configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Milliseconds between color-loop steps.
    pub colorloop_step_ms: u64,
}

/// One light's commands and templates.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Friendly name; defaults to the slug.
    pub name: Option<String>,
    /// Command that turns the light on.
    pub on_command: String,
    /// Command that turns the light off.
    pub off_command: String,
    /// Command whose output (or exit code) reports the power state.
    pub state_command: Option<String>,
    /// JSON pointer applied to the state command's output.
    pub state_value_template: Option<String>,
    /// Command whose output reports the brightness.
    pub brightness_state_command: Option<String>,
    /// JSON pointer applied to the brightness command's output.
    pub brightness_value_template: Option<String>,
    /// Command whose output reports the color as `r,g,b`.
    pub rgb_state_command: Option<String>,
    /// JSON pointer applied to the rgb command's output.
    pub rgb_value_template: Option<String>,
    /// Upper bound of the brightness domain, at least 1.
    pub brightness_scale: u16,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            name: None,
            on_command: noop_command(),
            off_command: noop_command(),
            state_command: None,
            state_value_template: None,
            brightness_state_command: None,
            brightness_value_template: None,
            rgb_state_command: None,
            rgb_value_template: None,
            brightness_scale: DEFAULT_BRIGHTNESS_SCALE,
        }
    }
}

fn noop_command() -> String {
    "true".to_string()
}

impl LightConfig {
    /// Build the immutable command specification for this light.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a command is empty or the scale
    /// is 0.
    pub fn command_spec(&self) -> Result<CommandSpec, ValidationError> {
        let mut builder = CommandSpec::builder()
            .on_command(&self.on_command)
            .off_command(&self.off_command)
            .brightness_scale(self.brightness_scale);
        if let Some(command) = &self.state_command {
            builder = builder.state_command(command);
        }
        if let Some(command) = &self.brightness_state_command {
            builder = builder.brightness_state_command(command);
        }
        if let Some(command) = &self.rgb_state_command {
            builder = builder.rgb_state_command(command);
        }
        builder.build()
    }

    /// Build the value templates configured for this light.
    #[must_use]
    pub fn templates(&self) -> ValueTemplates<JsonPointerTemplate> {
        ValueTemplates {
            state: self.state_value_template.as_deref().map(JsonPointerTemplate::new),
            brightness: self
                .brightness_value_template
                .as_deref()
                .map(JsonPointerTemplate::new),
            rgb: self.rgb_value_template.as_deref().map(JsonPointerTemplate::new),
        }
    }
}

impl Config {
    /// Load configuration from `cmdlight.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("cmdlight.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CMDLIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("CMDLIGHT_POLL_INTERVAL") {
            if let Ok(secs) = val.parse() {
                self.poll.interval_secs = secs;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lights.is_empty() {
            return Err(ConfigError::Validation("no lights configured".to_string()));
        }
        for (slug, light) in &self.lights {
            if light.brightness_scale == 0 {
                return Err(ConfigError::Validation(format!(
                    "light {slug}: brightness_scale must be at least 1"
                )));
            }
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cmdlightd=info,cmdlight=info".to_string(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            colorloop_step_ms: 500,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.filter, "cmdlightd=info,cmdlight=info");
        assert_eq!(config.poll.interval_secs, 30);
        assert_eq!(config.effects.colorloop_step_ms, 500);
        assert!(config.lights.is_empty());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r#"
            [logging]
            filter = 'debug'

            [poll]
            interval_secs = 5

            [effects]
            colorloop_step_ms = 100

            [lights.bedroom]
            name = 'Bedroom Strip'
            on_command = 'light-client --on'
            off_command = 'light-client --off'
            state_command = 'light-client --status'
            state_value_template = '/state/power'
            brightness_state_command = 'light-client --bri'
            brightness_value_template = '/state/bri'
            rgb_state_command = 'light-client --rgb'
            rgb_value_template = '/state/rgb'
            brightness_scale = 100
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.poll.interval_secs, 5);
        assert_eq!(config.effects.colorloop_step_ms, 100);

        let light = &config.lights["bedroom"];
        assert_eq!(light.name.as_deref(), Some("Bedroom Strip"));
        assert_eq!(light.on_command, "light-client --on");
        assert_eq!(light.brightness_scale, 100);
        assert_eq!(light.state_value_template.as_deref(), Some("/state/power"));
    }

    #[test]
    fn should_default_commands_in_partial_light() {
        let toml = "
            [lights.desk]
            state_command = 'desk-status'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        let light = &config.lights["desk"];
        assert_eq!(light.on_command, "true");
        assert_eq!(light.off_command, "true");
        assert_eq!(light.brightness_scale, 255);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert!(config.lights.is_empty());
    }

    #[test]
    fn should_reject_empty_lights_table() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg == "no lights configured"
        ));
    }

    #[test]
    fn should_reject_zero_brightness_scale() {
        let toml = "
            [lights.desk]
            brightness_scale = 0
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_poll_interval() {
        let toml = "
            [poll]
            interval_secs = 0

            [lights.desk]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_accept_minimal_light() {
        let toml = "[lights.desk]";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_build_assumed_spec_without_state_command() {
        let light = LightConfig::default();
        let spec = light.command_spec().unwrap();
        assert!(spec.assumed_state());
        assert_eq!(spec.on_command, "true");
    }

    #[test]
    fn should_build_polled_spec_with_state_command() {
        let light = LightConfig {
            state_command: Some("desk-status".to_string()),
            ..LightConfig::default()
        };
        let spec = light.command_spec().unwrap();
        assert!(spec.should_poll());
        assert!(!spec.assumed_state());
    }

    #[test]
    fn should_build_templates_only_where_configured() {
        let light = LightConfig {
            state_value_template: Some("/power".to_string()),
            ..LightConfig::default()
        };
        let templates = light.templates();
        assert!(templates.state.is_some());
        assert!(templates.brightness.is_none());
        assert!(templates.rgb.is_none());
    }
}
