//! RGB color values and the near-white clamp rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Channel distance from full white within which a color snaps to pure white.
pub const RGB_BOUNDARY: u8 = 40;

/// Pure white.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Rgb {
    fn default() -> Self {
        WHITE
    }
}

impl Rgb {
    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The smallest of the three channels.
    #[must_use]
    pub fn min_channel(self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// Snap near-white colors to pure white.
    ///
    /// A color counts as near-white when every channel exceeds
    /// `255 - RGB_BOUNDARY`; anything else passes through unchanged.
    #[must_use]
    pub fn white_clamped(self) -> Self {
        if self.min_channel() > u8::MAX - RGB_BOUNDARY {
            WHITE
        } else {
            self
        }
    }

    /// Fully-saturated color at the given position on the hue wheel.
    ///
    /// The wheel wraps at 256: 0 is red, ~85 is green, ~170 is blue.
    #[must_use]
    pub fn from_hue(hue: u8) -> Self {
        match hue {
            0..=84 => Self::new(255 - hue * 3, hue * 3, 0),
            85..=169 => {
                let pos = hue - 85;
                Self::new(0, 255 - pos * 3, pos * 3)
            }
            _ => {
                let pos = hue - 170;
                Self::new(pos * 3, 0, 255 - pos * 3)
            }
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from `"r,g,b"` (three comma-separated 0–255 integers).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = channels[..] else {
            return Err(ParseColorError::ChannelCount {
                count: channels.len(),
            });
        };
        Ok(Self::new(r.parse()?, g.parse()?, b.parse()?))
    }
}

/// Details about why a color string could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ParseColorError {
    /// Not exactly three comma-separated parts.
    #[error("expected three comma-separated channels, got {count}")]
    ChannelCount {
        /// How many parts were found.
        count: usize,
    },

    /// A channel was not a 0–255 integer.
    #[error("invalid channel value")]
    Channel(#[from] std::num::ParseIntError),
}
