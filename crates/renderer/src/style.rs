//! Colours and line styles for figure rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRID: Color = Color::rgb(176, 176, 176);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// `#rrggbb` form used in SVG attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opacity in [0, 1].
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Default ten-colour line cycle (the "tab10" palette).
pub const DEFAULT_CYCLE: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// How a data series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Connected polyline
    Solid,
    /// One cross marker per sample
    Cross,
}

impl LineStyle {
    /// Solid for more than one sample, markers otherwise, so a lone sample
    /// stays visible.
    pub fn for_len(len: usize) -> Self {
        if len > 1 {
            LineStyle::Solid
        } else {
            LineStyle::Cross
        }
    }
}

/// Stroke and font sizes in points; scaled by dpi when rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub line_width: f64,
    pub marker_size: f64,
    pub grid_width: f64,
    pub title_size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            line_width: 1.5,
            marker_size: 6.0,
            grid_width: 0.8,
            title_size: 12.0,
            label_size: 10.0,
            tick_size: 10.0,
        }
    }
}
