//! Per-pixel palette selection.
//!
//! A pixel is classified into one of four buckets by thresholding its red
//! channel, the bucket is shifted by the darkness bias and clamped into the
//! palette, and the selected colour is written out fully opaque.
//!
//! The red channel is used directly as a brightness proxy; there is no
//! luminance blend. Thresholds are fixed tuning constants.

use crate::color::LinearRgba;
use crate::palette::{PaletteSettings, PALETTE_SIZE};

/// Red values above this select bucket 0.
pub const LIGHT_THRESHOLD: f32 = 0.75;
/// Red values above this (and at most [`LIGHT_THRESHOLD`]) select bucket 1.
pub const MID_THRESHOLD: f32 = 0.3;
/// Red values above this (and at most [`MID_THRESHOLD`]) select bucket 2.
/// Everything else is bucket 3.
pub const DARK_THRESHOLD: f32 = 0.1;

const MAX_INDEX: i32 = PALETTE_SIZE as i32 - 1;

/// Classify a red channel value into a bucket in `0..=3`.
///
/// Input is not clamped: values above 1.0 land in bucket 0, negative values
/// in bucket 3. NaN fails every comparison and lands in bucket 3.
///
/// ```
/// use palette_mapper::classify;
///
/// assert_eq!(classify(0.9), 0);
/// assert_eq!(classify(0.75), 1);
/// assert_eq!(classify(0.3), 2);
/// assert_eq!(classify(0.1), 3);
/// ```
#[inline]
pub fn classify(red_channel: f32) -> i32 {
    if red_channel > LIGHT_THRESHOLD {
        0
    } else if red_channel > MID_THRESHOLD {
        1
    } else if red_channel > DARK_THRESHOLD {
        2
    } else {
        3
    }
}

/// Shift a bucket by the darkness bias and clamp it to a palette slot.
///
/// Total over all integers; the addition saturates so extreme biases still
/// clamp to 0 or 3.
///
/// ```
/// use palette_mapper::resolve_index;
///
/// assert_eq!(resolve_index(1, 0), 1);
/// assert_eq!(resolve_index(3, 1), 3);
/// assert_eq!(resolve_index(3, -5), 0);
/// ```
#[inline]
pub fn resolve_index(bucket_index: i32, darkness: i32) -> usize {
    bucket_index.saturating_add(darkness).clamp(0, MAX_INDEX) as usize
}

/// Palette slot selected for a red channel value under a darkness bias.
#[inline]
pub fn select_index(red_channel: f32, darkness: i32) -> usize {
    resolve_index(classify(red_channel), darkness)
}

/// Map a red channel value to its opaque palette colour.
#[inline]
pub fn evaluate(red_channel: f32, settings: &PaletteSettings) -> LinearRgba {
    settings.colours[select_index(red_channel, settings.darkness)].with_alpha(1.0)
}

/// Fragment entry point of the full-screen pass: one scene sample in, one
/// output colour out. Only the red channel of `source` is read.
#[inline]
pub fn palette_swap_fragment(source: LinearRgba, settings: &PaletteSettings) -> LinearRgba {
    evaluate(source.r, settings)
}
