//! Gamma lookup tables generated by build.rs

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB code value to linear light.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Decode an sRGB value (0.0..=1.0) to linear light.
///
/// Palette colours are decoded once per palette, so this uses the exact curve
/// instead of a table.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    let srgb = srgb.clamp(0.0, 1.0);
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a linear value (0.0..=1.0) to sRGB using the LUT with linear
/// interpolation. Out-of-range input is clamped.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let last = LINEAR_TO_SRGB.len() - 1;
    let scaled = linear.clamp(0.0, 1.0) * last as f32;
    let index = scaled as usize;
    if index >= last {
        return LINEAR_TO_SRGB[last];
    }

    let frac = scaled - index as f32;
    let a = LINEAR_TO_SRGB[index];
    let b = LINEAR_TO_SRGB[index + 1];
    a + (b - a) * frac
}
