//! PaletteSwap builder -- the entry point for applying the effect to a frame.

use crate::color::{LinearRgba, Srgb};
use crate::output::SwappedImage;
use crate::palette::{Palette, PaletteSettings, PALETTE_SIZE};
use crate::pass::index_pass;

use super::SwapError;

/// Applies the four-colour palette swap to whole frames.
///
/// - Construction requires a palette or a complete settings snapshot.
/// - [`darkness()`](Self::darkness) consumes and returns `self`.
/// - [`apply()`](Self::apply) takes `&self`, so one builder serves any
///   number of frames with the same snapshot.
///
/// ```
/// use palette_mapper::{LinearRgba, Palette, PaletteSwap};
///
/// let palette = Palette::from_hex(&["#ffffff", "#aaaaaa", "#555555", "#000000"]).unwrap();
/// let swap = PaletteSwap::new(palette).darkness(1);
///
/// let frame = vec![LinearRgba::new(0.9, 0.9, 0.9, 1.0); 4];
/// let image = swap.apply(&frame, 2, 2).unwrap();
/// assert_eq!(image.indices(), &[1, 1, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteSwap {
    settings: PaletteSettings,
    srgb: [Srgb; PALETTE_SIZE],
}

impl PaletteSwap {
    /// Darkness defaults to 0.
    pub fn new(palette: Palette) -> Self {
        Self {
            settings: palette.to_settings(0),
            srgb: *palette.colours(),
        }
    }

    /// Start from an existing snapshot. Output bytes are encoded from the
    /// snapshot's linear colours.
    pub fn from_settings(settings: PaletteSettings) -> Self {
        Self {
            srgb: settings.colours.map(Srgb::from),
            settings,
        }
    }

    #[inline]
    pub fn darkness(mut self, darkness: i32) -> Self {
        self.settings.darkness = darkness;
        self
    }

    #[inline]
    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    /// Swap a frame of linear samples (row-major, `width * height` long).
    ///
    /// Each pixel gets the slot [`evaluate`](crate::evaluate) would pick for
    /// it, so [`SwappedImage::pixels`] matches [`full_screen_pass`](crate::full_screen_pass)
    /// over the same frame and settings.
    pub fn apply(
        &self,
        pixels: &[LinearRgba],
        width: usize,
        height: usize,
    ) -> Result<SwappedImage, SwapError> {
        check_len(pixels.len(), width, height)?;
        let indices = index_pass(pixels, self.settings.darkness);
        Ok(SwappedImage::new(
            indices,
            width,
            height,
            self.settings,
            self.srgb,
        ))
    }

    /// Swap a frame of packed 8-bit sRGB RGBA bytes, as read from an image
    /// file. Samples are linearised before classification.
    pub fn apply_srgba8(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<SwappedImage, SwapError> {
        if rgba.len() % 4 != 0 {
            return Err(SwapError::DimensionMismatch {
                expected: width * height * 4,
                actual: rgba.len(),
            });
        }
        let pixels: Vec<LinearRgba> = rgba
            .chunks_exact(4)
            .map(|px| LinearRgba::from_srgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        self.apply(&pixels, width, height)
    }
}

fn check_len(len: usize, width: usize, height: usize) -> Result<(), SwapError> {
    let expected = width * height;
    if len != expected {
        return Err(SwapError::DimensionMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}
