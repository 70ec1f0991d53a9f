//! Unified error type for the palette-mapper public API.

use std::fmt;

use crate::palette::{PaletteError, ParseColorError};
use crate::uniform::UniformError;

/// Wraps every error the crate can return, for `?` propagation in host code.
///
/// None of these can occur inside the per-pixel palette swap; they come from
/// building palettes, decoding uniform blocks, or handing a frame of the
/// wrong size to [`PaletteSwap::apply`](crate::PaletteSwap::apply).
#[derive(Debug)]
pub enum SwapError {
    Palette(PaletteError),
    ParseColor(ParseColorError),
    Uniform(UniformError),
    /// Pixel buffer length does not match `width * height`
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::Palette(err) => write!(f, "palette error: {err}"),
            SwapError::ParseColor(err) => write!(f, "color parse error: {err}"),
            SwapError::Uniform(err) => write!(f, "uniform error: {err}"),
            SwapError::DimensionMismatch { expected, actual } => write!(
                f,
                "frame has {actual} samples, expected {expected} for its dimensions"
            ),
        }
    }
}

impl std::error::Error for SwapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwapError::Palette(err) => Some(err),
            SwapError::ParseColor(err) => Some(err),
            SwapError::Uniform(err) => Some(err),
            SwapError::DimensionMismatch { .. } => None,
        }
    }
}

impl From<PaletteError> for SwapError {
    fn from(err: PaletteError) -> Self {
        SwapError::Palette(err)
    }
}

impl From<ParseColorError> for SwapError {
    fn from(err: ParseColorError) -> Self {
        SwapError::ParseColor(err)
    }
}

impl From<UniformError> for SwapError {
    fn from(err: UniformError) -> Self {
        SwapError::Uniform(err)
    }
}
