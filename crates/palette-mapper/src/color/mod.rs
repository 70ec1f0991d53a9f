//! Colour types and gamma conversion
//!
//! - [`Srgb`]: gamma-encoded colour, used for authored palettes and image I/O.
//! - [`LinearRgb`]: linear light, the space the palette swap runs in.
//! - [`LinearRgba`]: a linear sample with alpha, the per-pixel input and output
//!   of the fragment entry point.
//!
//! ```
//! use palette_mapper::{LinearRgb, Srgb};
//!
//! let grey = Srgb::from_u8(128, 128, 128);
//! let linear = LinearRgb::from(grey);
//! assert!(linear.r < grey.r);
//! ```

mod linear_rgb;
mod lut;
mod srgb;

pub use linear_rgb::{LinearRgb, LinearRgba};
pub use srgb::Srgb;
