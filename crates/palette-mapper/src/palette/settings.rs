//! Per-frame configuration snapshot.

use super::palette::{Palette, PALETTE_SIZE};
use crate::color::LinearRgb;

/// The configuration the palette swap reads: four linear colours and a
/// signed darkness bias.
///
/// Index 0 is used for the brightest classification bucket and index 3 for
/// the darkest. A positive `darkness` shifts every pixel towards higher
/// indices, a negative one towards lower indices.
///
/// Settings are plain `Copy` values. A frame reads one snapshot for all of
/// its pixels and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteSettings {
    pub colours: [LinearRgb; PALETTE_SIZE],
    pub darkness: i32,
}

impl PaletteSettings {
    pub const fn new(colours: [LinearRgb; PALETTE_SIZE], darkness: i32) -> Self {
        Self { colours, darkness }
    }

    /// Same colours, different bias.
    #[must_use]
    pub const fn with_darkness(self, darkness: i32) -> Self {
        Self {
            colours: self.colours,
            darkness,
        }
    }
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Palette::default().to_settings(0)
    }
}
