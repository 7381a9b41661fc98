//! Which panels of a path figure to draw.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PpathError;

/// Panel selection for a path figure.
///
/// Parsed from a comma separated list of the exact names `pos`, `los` and
/// `no_map`; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelFlags {
    /// Latitude and longitude against radius (polar)
    pub lat_lon: bool,
    /// Latitude against longitude (map)
    pub map: bool,
    /// Zenith and azimuth angles (polar)
    pub za_aa: bool,
}

impl Default for PanelFlags {
    fn default() -> Self {
        Self {
            lat_lon: true,
            map: true,
            za_aa: false,
        }
    }
}

impl PanelFlags {
    /// Position, line of sight and map; the default when plotting a list of
    /// paths.
    pub fn everything() -> Self {
        Self {
            lat_lon: true,
            map: true,
            za_aa: true,
        }
    }

    pub fn any(&self) -> bool {
        self.lat_lon || self.map || self.za_aa
    }
}

impl FromStr for PanelFlags {
    type Err = PpathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self {
            lat_lon: false,
            map: true,
            za_aa: false,
        };
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token {
                "pos" => flags.lat_lon = true,
                "los" => flags.za_aa = true,
                "no_map" => flags.map = false,
                other => {
                    return Err(PpathError::invalid(
                        "show",
                        format!("unknown panel '{}' (expected pos, los or no_map)", other),
                    ))
                }
            }
        }
        Ok(flags)
    }
}
