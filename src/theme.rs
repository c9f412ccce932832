//! Visual theme selection.

use std::fmt;
use std::str::FromStr;

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::color::rgba;
use crate::error::ConfigError;

/// One of the two visual presets the renderer knows about.
///
/// The theme only changes the translucent wash painted over the surface at
/// the start of every frame. It is passed into each frame explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Frosted "glass" preset.
    Glass,
    /// Default blue preset.
    #[default]
    #[serde(alias = "blue")]
    Default,
}

impl Theme {
    /// Low-alpha fill painted over the whole surface each frame.
    pub fn background_tint(self) -> Vec4 {
        match self {
            Theme::Glass => rgba(8, 12, 20, 0.02),
            Theme::Default => rgba(4, 8, 16, 0.01),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Glass => "glass",
            Theme::Default => "default",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glass" => Ok(Theme::Glass),
            // "blue" is the name the page used for its default mode
            "default" | "blue" => Ok(Theme::Default),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}
