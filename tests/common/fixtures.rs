//! Test fixtures and constants.

use std::io::Cursor;

/// Config with one grey ramp, one colour palette and two levels
pub const TEST_CONFIG: &str = r##"
default_palette: grey
palettes:
  grey:
    colours: ["#ffffff", "#aaaaaa", "#555555", "#000000"]
  rgb:
    colours: ["#ff0000", "#00ff00", "#0000ff", "#000000"]
levels:
  Level_0:
    palette: rgb
  Level_1: {}
"##;

/// sRGB grey codes, one per bucket at darkness 0: linear values are
/// ~0.91, ~0.45, ~0.13 and 0.0
pub const BUCKET_GREYS: [u8; 4] = [245, 180, 100, 0];

/// Encode 8-bit RGBA as PNG
pub fn png_from_rgba(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    buf
}

/// A 4x1 strip with one pixel per bucket
pub fn bucket_strip_png() -> Vec<u8> {
    let rgba: Vec<u8> = BUCKET_GREYS.iter().flat_map(|&v| [v, v, v, 255]).collect();
    png_from_rgba(4, 1, &rgba)
}

/// Decode any PNG to (width, height, RGBA bytes)
pub fn decode_rgba(png_bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let mut decoder = png::Decoder::new(Cursor::new(png_bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => panic!("indexed PNG was not expanded"),
    };
    (info.width, info.height, rgba)
}

/// RGB triples of a decoded RGBA buffer
pub fn rgb_pixels(rgba: &[u8]) -> Vec<[u8; 3]> {
    rgba.chunks_exact(4).map(|p| [p[0], p[1], p[2]]).collect()
}
