//! Image I/O and the CPU post-process renderer.

pub mod png_codec;
pub mod post_process;

pub use png_codec::{decode_png, encode_swapped_png, DecodedImage};
pub use post_process::PostProcessRenderer;
