//! RGBA colors and the widget palette.

use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    /// Same color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn faded(&self, factor: f32) -> Self {
        Self::new(self.r, self.g, self.b, self.a * factor)
    }

    /// Black color
    pub const BLACK: Self = Self::rgb8(0, 0, 0);
    /// White color
    pub const WHITE: Self = Self::rgb8(255, 255, 255);
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    // Neutral and accent palette shared by the widgets.

    /// Gray 50
    pub const GRAY_50: Self = Self::rgb8(249, 250, 251);
    /// Gray 100
    pub const GRAY_100: Self = Self::rgb8(243, 244, 246);
    /// Gray 200
    pub const GRAY_200: Self = Self::rgb8(229, 231, 235);
    /// Gray 300
    pub const GRAY_300: Self = Self::rgb8(209, 213, 219);
    /// Gray 500
    pub const GRAY_500: Self = Self::rgb8(107, 114, 128);
    /// Gray 700
    pub const GRAY_700: Self = Self::rgb8(55, 65, 81);
    /// Gray 900
    pub const GRAY_900: Self = Self::rgb8(17, 24, 39);
    /// Indigo 50
    pub const INDIGO_50: Self = Self::rgb8(238, 242, 255);
    /// Indigo 500
    pub const INDIGO_500: Self = Self::rgb8(99, 102, 241);
    /// Indigo 600
    pub const INDIGO_600: Self = Self::rgb8(79, 70, 229);
    /// Red 500
    pub const RED_500: Self = Self::rgb8(239, 68, 68);
    /// Red 600
    pub const RED_600: Self = Self::rgb8(220, 38, 38);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
