//! PNG decode into 8-bit RGBA, and PNG encode of palette-swapped frames.

use crate::error::RenderError;
use palette_mapper::{SwappedImage, PALETTE_SIZE};
use std::io::Cursor;

// Maximum accepted input dimensions
pub const MAX_WIDTH: u32 = 4096;
pub const MAX_HEIGHT: u32 = 4096;

/// A decoded image as packed 8-bit sRGB RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode a PNG of any colour type and bit depth into 8-bit RGBA.
///
/// Palette and low-bit-depth images are expanded, 16-bit samples are
/// stripped to 8 bits, grey is replicated into R, G and B, and images
/// without alpha get an opaque alpha channel.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width == 0 || height == 0 || width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(RenderError::UnsupportedDimensions { width, height });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(width, height, color_type = ?frame.color_type, "Decoded PNG");
    Ok(DecodedImage {
        width,
        height,
        rgba,
    })
}

/// Encode a palette-swapped frame.
///
/// The output format follows the palette:
/// - all four colours grey → 8-bit grayscale with the exact grey values
/// - otherwise → 2-bit indexed with the four colours in PLTE
///
/// The result is re-compressed with oxipng; if that fails the fast encode is
/// returned as is.
pub fn encode_swapped_png(image: &SwappedImage) -> Result<Vec<u8>, RenderError> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let colours = image.palette_srgb().map(|c| c.to_bytes());

    let png_bytes = if colours.iter().all(|&[r, g, b]| r == g && g == b) {
        let lut: [u8; PALETTE_SIZE] = colours.map(|[grey, _, _]| grey);
        let grey: Vec<u8> = image.indices().iter().map(|&i| lut[i as usize]).collect();
        encode_png(
            width,
            height,
            png::ColorType::Grayscale,
            png::BitDepth::Eight,
            None,
            &grey,
        )?
    } else {
        let plte: Vec<u8> = colours.iter().flatten().copied().collect();
        encode_png(
            width,
            height,
            png::ColorType::Indexed,
            png::BitDepth::Two,
            Some(&plte),
            &pack_2bit(image.indices(), width),
        )?
    };

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack palette indices four to a byte, rows padded to a whole byte.
fn pack_2bit(indices: &[u8], width: u32) -> Vec<u8> {
    let width = width as usize;
    indices
        .chunks(width)
        .flat_map(|row| {
            row.chunks(4).map(|quad| {
                quad.iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &idx)| byte | ((idx & 0b11) << (6 - 2 * i)))
            })
        })
        .collect()
}
