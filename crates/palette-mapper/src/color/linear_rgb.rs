//! Linear RGB colour types
//!
//! The palette swap reads and writes linear samples: the scene texture it
//! samples holds linear light, and the palette colours are linearised when the
//! configuration snapshot is built.

use super::lut::srgb8_to_linear;
use super::srgb::Srgb;

/// A colour in linear RGB. Values are nominally 0.0..=1.0 but are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Extend with an alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> LinearRgba {
        LinearRgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// A linear RGBA sample: one texel read from the scene, or one fragment
/// written to the output target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Decode an 8-bit sRGB RGBA sample. Alpha is linear already.
    #[inline]
    pub fn from_srgba8(rgba: [u8; 4]) -> Self {
        Self {
            r: srgb8_to_linear(rgba[0]),
            g: srgb8_to_linear(rgba[1]),
            b: srgb8_to_linear(rgba[2]),
            a: rgba[3] as f32 / 255.0,
        }
    }

    /// Drop alpha.
    #[inline]
    pub const fn rgb(self) -> LinearRgb {
        LinearRgb::new(self.r, self.g, self.b)
    }

    /// Encode to 8-bit sRGB RGBA.
    pub fn to_srgba8(self) -> [u8; 4] {
        let [r, g, b] = Srgb::from(self.rgb()).to_bytes();
        let a = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        [r, g, b, a]
    }
}

impl From<LinearRgb> for LinearRgba {
    /// Opaque sample.
    fn from(rgb: LinearRgb) -> Self {
        rgb.with_alpha(1.0)
    }
}
