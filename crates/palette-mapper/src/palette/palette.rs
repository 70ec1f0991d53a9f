//! Authored four-colour palette.

use super::error::PaletteError;
use super::settings::PaletteSettings;
use crate::color::{LinearRgb, Srgb};

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 4;

/// Four sRGB colours, ordered from the colour used for the brightest pixels
/// (index 0) to the colour used for the darkest pixels (index 3).
///
/// The fixed-size array makes an out-of-range palette slot unrepresentable;
/// slices of the wrong length are rejected by [`Palette::from_slice`].
///
/// ```
/// use palette_mapper::Palette;
///
/// let palette = Palette::from_hex(&["#fff", "#aaa", "#555", "#000"]).unwrap();
/// let settings = palette.to_settings(0);
/// assert_eq!(settings.darkness, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    colours: [Srgb; PALETTE_SIZE],
}

impl Palette {
    pub const fn new(colours: [Srgb; PALETTE_SIZE]) -> Self {
        Self { colours }
    }

    /// Build a palette from a slice that must hold exactly four colours.
    pub fn from_slice(colours: &[Srgb]) -> Result<Self, PaletteError> {
        let colours: [Srgb; PALETTE_SIZE] =
            colours
                .try_into()
                .map_err(|_| PaletteError::WrongColourCount {
                    found: colours.len(),
                })?;
        Ok(Self { colours })
    }

    /// Parse four hex colour strings (`#RRGGBB` or `#RGB`).
    pub fn from_hex<S: AsRef<str>>(colours: &[S]) -> Result<Self, PaletteError> {
        if colours.len() != PALETTE_SIZE {
            return Err(PaletteError::WrongColourCount {
                found: colours.len(),
            });
        }

        let mut parsed = [Srgb::new(0.0, 0.0, 0.0); PALETTE_SIZE];
        for (index, (slot, hex)) in parsed.iter_mut().zip(colours).enumerate() {
            *slot = hex
                .as_ref()
                .parse()
                .map_err(|source| PaletteError::ParseColor { index, source })?;
        }
        Ok(Self { colours: parsed })
    }

    #[inline]
    pub fn colours(&self) -> &[Srgb; PALETTE_SIZE] {
        &self.colours
    }

    /// True when every entry is a neutral grey.
    pub fn is_greyscale(&self) -> bool {
        self.colours.iter().all(|c| c.is_grey())
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colours.iter().map(|c| c.to_hex()).collect()
    }

    /// Linearise the colours into a configuration snapshot with the given
    /// darkness bias.
    pub fn to_settings(&self, darkness: i32) -> PaletteSettings {
        PaletteSettings::new(self.colours.map(LinearRgb::from), darkness)
    }
}

impl Default for Palette {
    /// Black, dark grey, light grey, white.
    fn default() -> Self {
        Self::new([
            Srgb::new(0.0, 0.0, 0.0),
            Srgb::new(0.3, 0.3, 0.3),
            Srgb::new(0.7, 0.7, 0.7),
            Srgb::new(1.0, 1.0, 1.0),
        ])
    }
}
