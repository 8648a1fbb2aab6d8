//! Light state — the reconciled snapshot of a light's attributes.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// A continuous visual behaviour layered on top of ordinary control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// No effect is active.
    #[default]
    None,
    /// Repeating hue-wheel cycle driven by a background task.
    ColorLoop,
    /// Color forced to pure white.
    White,
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::ColorLoop => f.write_str("color_loop"),
            Self::White => f.write_str("white"),
        }
    }
}

/// The in-memory snapshot of a light's attributes.
///
/// Owned by the reconciler; every mutation goes through it (or through an
/// effect step holding the same lock). Brightness stays within the
/// configured scale and colors within the white-clamp rule because all
/// writes use [`set_brightness`](Self::set_brightness) and
/// [`set_color`](Self::set_color).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightState {
    pub on: bool,
    pub brightness: u16,
    pub color: Rgb,
    pub effect: Effect,
}

impl LightState {
    /// Store a color, applying the near-white clamp.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color.white_clamped();
    }

    /// Store a brightness value, clamped into `[0, scale]`.
    pub fn set_brightness(&mut self, value: u16, scale: u16) {
        self.brightness = value.min(scale);
    }
}
