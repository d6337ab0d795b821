//! User-adjustable depth and light parameters.

use serde::{Deserialize, Serialize};

/// Upper bound of every percentage slider.
pub const PERCENT_MAX: u8 = 100;

/// Depth map generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthSettings {
    /// Focus bias, 0 = far focus, 100 = close focus
    pub offset: u8,
}

impl Default for DepthSettings {
    fn default() -> Self {
        Self { offset: 50 }
    }
}

impl DepthSettings {
    /// Returns a copy with `offset` clamped to 0–100.
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset.min(PERCENT_MAX),
        }
    }
}

/// Virtual light source parameters.
///
/// `x` and `y` are percentage coordinates within the image frame.
/// `color` is a hex string and is passed to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSettings {
    pub enabled: bool,
    pub x: u8,
    pub y: u8,
    pub color: String,
    pub intensity: u8,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 25,
            y: 25,
            color: "#ffdd75".to_string(),
            intensity: 75,
        }
    }
}

impl LightSettings {
    /// Returns a copy with every percentage field clamped to 0–100.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.min(PERCENT_MAX),
            y: self.y.min(PERCENT_MAX),
            intensity: self.intensity.min(PERCENT_MAX),
            ..self
        }
    }
}
