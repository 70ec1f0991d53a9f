//! Output of the palette swap.
//!
//! [`SwappedImage`] keeps one palette slot per pixel. Colour output (linear
//! samples, 8-bit sRGB RGB or RGBA) is produced on demand from the slots.

mod swapped_image;

pub use swapped_image::SwappedImage;
