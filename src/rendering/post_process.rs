//! CPU renderer for the palette swap post-process.
//!
//! Plays the host's part around the per-pixel function: reads the scene
//! image (PNG decode), runs the full-screen pass with one settings snapshot,
//! and writes the output target (PNG encode).

use crate::error::RenderError;
use crate::rendering::png_codec::{decode_png, encode_swapped_png};
use palette_mapper::{PaletteSwap, SwappedImage, PALETTE_SIZE};
use std::path::Path;

/// Renders palette-swapped PNGs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostProcessRenderer;

impl PostProcessRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Decode `png`, run the pass and return the swapped frame.
    pub fn swap_png(&self, png: &[u8], swap: &PaletteSwap) -> Result<SwappedImage, RenderError> {
        let decoded = decode_png(png)?;
        let image = swap.apply_srgba8(
            &decoded.rgba,
            decoded.width as usize,
            decoded.height as usize,
        )?;

        tracing::debug!(
            width = decoded.width,
            height = decoded.height,
            darkness = swap.settings().darkness,
            slots = ?slot_histogram(&image),
            "Palette swap pass complete"
        );
        Ok(image)
    }

    /// Decode `png`, run the pass and encode the result as PNG.
    pub fn render_png(&self, png: &[u8], swap: &PaletteSwap) -> Result<Vec<u8>, RenderError> {
        let image = self.swap_png(png, swap)?;
        encode_swapped_png(&image)
    }

    /// File-to-file variant of [`render_png`](Self::render_png). Returns the
    /// number of bytes written.
    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        swap: &PaletteSwap,
    ) -> Result<usize, RenderError> {
        let source = std::fs::read(input)?;
        let png = self.render_png(&source, swap)?;
        std::fs::write(output, &png)?;
        Ok(png.len())
    }
}

/// Pixel count per palette slot.
pub fn slot_histogram(image: &SwappedImage) -> [usize; PALETTE_SIZE] {
    let mut counts = [0; PALETTE_SIZE];
    for &index in image.indices() {
        counts[index as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::png_codec::DecodedImage;
    use palette_mapper::Palette;

    fn gradient_png() -> Vec<u8> {
        // 8 grey steps; sRGB codes chosen to straddle the linear thresholds
        let codes = [0u8, 60, 100, 130, 160, 200, 230, 255];
        let rgba: Vec<u8> = codes.iter().flat_map(|&v| [v, v, v, 255]).collect();
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, 8, 1);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&rgba).unwrap();
        }
        buf
    }

    fn grey_ramp() -> PaletteSwap {
        PaletteSwap::new(Palette::from_hex(&["#ffffff", "#aaaaaa", "#555555", "#000000"]).unwrap())
    }

    #[test]
    fn test_swap_png_buckets() {
        let image = PostProcessRenderer::new()
            .swap_png(&gradient_png(), &grey_ramp())
            .unwrap();
        // linear: 0, .045, .127, .223, .352, .578, .791, 1.0
        assert_eq!(image.indices(), &[3, 3, 2, 2, 1, 1, 0, 0]);
        assert_eq!(slot_histogram(&image), [2, 2, 2, 2]);
    }

    #[test]
    fn test_render_png_output_uses_palette_only() {
        let png = PostProcessRenderer::new()
            .render_png(&gradient_png(), &grey_ramp().darkness(1))
            .unwrap();
        let DecodedImage { width, rgba, .. } = decode_png(&png).unwrap();
        assert_eq!(width, 8);
        let allowed = [[0xaa, 0xaa, 0xaa, 255], [0x55, 0x55, 0x55, 255], [0, 0, 0, 255]];
        for px in rgba.chunks_exact(4) {
            assert!(allowed.iter().any(|a| a == px), "unexpected pixel {px:?}");
        }
    }

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        std::fs::write(&input, gradient_png()).unwrap();

        let written = PostProcessRenderer::new()
            .render_file(&input, &output, &grey_ramp())
            .unwrap();
        assert_eq!(written, std::fs::metadata(&output).unwrap().len() as usize);
    }

    #[test]
    fn test_render_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = PostProcessRenderer::new().render_file(
            &dir.path().join("absent.png"),
            &dir.path().join("out.png"),
            &grey_ramp(),
        );
        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
