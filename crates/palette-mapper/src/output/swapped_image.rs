//! Palette-swapped image.

use crate::color::{LinearRgba, Srgb};
use crate::palette::{PaletteSettings, PALETTE_SIZE};

/// Result of running the palette swap over a frame.
///
/// Stores the selected palette slot (0..=3) per pixel in row-major order, the
/// settings the frame was evaluated with, and the sRGB form of the four
/// colours used for byte output.
///
/// ```
/// use palette_mapper::{LinearRgba, Palette, PaletteSwap};
///
/// let swap = PaletteSwap::new(Palette::default());
/// let frame = vec![LinearRgba::new(0.9, 0.0, 0.0, 1.0); 4];
/// let image = swap.apply(&frame, 2, 2).unwrap();
///
/// assert_eq!(image.indices(), &[0, 0, 0, 0]);
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct SwappedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    settings: PaletteSettings,
    srgb: [Srgb; PALETTE_SIZE],
}

impl SwappedImage {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height` and every index
    /// is a palette slot.
    pub(crate) fn new(
        indices: Vec<u8>,
        width: usize,
        height: usize,
        settings: PaletteSettings,
        srgb: [Srgb; PALETTE_SIZE],
    ) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        debug_assert!(indices.iter().all(|&i| (i as usize) < PALETTE_SIZE));
        Self {
            indices,
            width,
            height,
            settings,
            srgb,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    /// The four output colours in sRGB, by palette slot.
    #[inline]
    pub fn palette_srgb(&self) -> &[Srgb; PALETTE_SIZE] {
        &self.srgb
    }

    /// Linear output samples, alpha always 1.0.
    pub fn pixels(&self) -> Vec<LinearRgba> {
        self.indices
            .iter()
            .map(|&i| self.settings.colours[i as usize].with_alpha(1.0))
            .collect()
    }

    /// Packed 8-bit sRGB `[R, G, B]` bytes, 3 per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let lut = self.srgb.map(Srgb::to_bytes);
        self.indices
            .iter()
            .flat_map(|&i| lut[i as usize])
            .collect()
    }

    /// Packed 8-bit sRGB `[R, G, B, A]` bytes, alpha always 255.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let lut = self.srgb.map(|c| {
            let [r, g, b] = c.to_bytes();
            [r, g, b, 255]
        });
        self.indices
            .iter()
            .flat_map(|&i| lut[i as usize])
            .collect()
    }
}
