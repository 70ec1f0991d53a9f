use crate::error::RenderError;
use crate::rendering::PostProcessRenderer;
use palette_mapper::PaletteSwap;

/// Async front for the palette swap renderer
#[derive(Debug, Default, Clone)]
pub struct RenderService {
    renderer: PostProcessRenderer,
}

impl RenderService {
    pub fn new() -> Self {
        Self {
            renderer: PostProcessRenderer::new(),
        }
    }

    /// Swap a PNG frame with the given snapshot.
    ///
    /// Decoding, the pass and re-encoding are CPU bound, so they run on the
    /// blocking pool.
    pub async fn render(&self, png: Vec<u8>, swap: PaletteSwap) -> Result<Vec<u8>, RenderError> {
        let renderer = self.renderer;

        tokio::task::spawn_blocking(move || renderer.render_png(&png, &swap))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::decode_png;
    use palette_mapper::Palette;

    fn white_png() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, 2, 2);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[255; 12]).unwrap();
        }
        buf
    }

    #[tokio::test]
    async fn test_render_in_blocking_context() {
        let service = RenderService::new();
        let palette = Palette::from_hex(&["#ff0000", "#00ff00", "#0000ff", "#000000"]).unwrap();

        let png = service
            .render(white_png(), PaletteSwap::new(palette))
            .await
            .unwrap();
        let decoded = decode_png(&png).unwrap();
        assert_eq!(&decoded.rgba[..4], &[255, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_render_rejects_garbage() {
        let service = RenderService::new();
        let result = service
            .render(b"not a png".to_vec(), PaletteSwap::new(Palette::default()))
            .await;
        assert!(matches!(result, Err(RenderError::PngDecode(_))));
    }
}
