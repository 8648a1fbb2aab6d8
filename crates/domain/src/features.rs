//! Capability flags — which optional attributes a light supports.

use serde::{Deserialize, Serialize};

/// Features a light supports, fixed at construction from which optional
/// commands are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightFeatures {
    /// Brightness can be set and is tracked.
    pub brightness: bool,
    /// RGB color can be set and is tracked.
    pub rgb_color: bool,
    /// Effects (color loop, forced white) can be activated.
    pub effect: bool,
    /// Flash is advertised. Never derived from the command schema.
    pub flash: bool,
    /// Transitions are advertised. Never derived from the command schema.
    pub transition: bool,
}
