#![allow(clippy::excessive_precision)]

//! palette-mapper: four-colour palette swap for full-screen post-processing
//!
//! Every pixel of a rendered frame is replaced by one of four configured
//! colours. The colour is chosen by thresholding the pixel's red channel into
//! a bucket, shifting the bucket by an integer darkness bias, and clamping the
//! result into the palette.
//!
//! # Quick Start
//!
//! ```
//! use palette_mapper::{LinearRgba, Palette, PaletteSwap};
//!
//! let palette = Palette::from_hex(&["#e0f8d0", "#88c070", "#346856", "#081820"]).unwrap();
//! let swap = PaletteSwap::new(palette);
//!
//! let frame = vec![LinearRgba::new(0.5, 0.5, 0.5, 1.0); 4];
//! let image = swap.apply(&frame, 2, 2).unwrap();
//! assert_eq!(image.indices(), &[1, 1, 1, 1]);
//! ```
//!
//! # Per-pixel function
//!
//! The fragment entry point is [`palette_swap_fragment`]; it is built from
//! [`classify`] and [`resolve_index`]:
//!
//! | red channel            | bucket |
//! |------------------------|--------|
//! | `> 0.75`               | 0      |
//! | `> 0.3` and `<= 0.75`  | 1      |
//! | `> 0.1` and `<= 0.3`   | 2      |
//! | `<= 0.1`               | 3      |
//!
//! `index = clamp(bucket + darkness, 0, 3)`, output is `colours[index]` with
//! alpha 1.0. Both steps are total, so there is no failure path per pixel.
//!
//! # Colour spaces
//!
//! The swap runs on linear samples, the same values a shader reads from an
//! HDR or sRGB-format render target. Palettes are authored in sRGB
//! ([`Palette`]) and linearised once into a [`PaletteSettings`] snapshot.
//!
//! # Uploading settings
//!
//! [`PaletteSettings::to_uniform_bytes`] produces the uniform block for a
//! shader implementation of the same function, with the 16-byte-aligned
//! variant selected by [`UniformLayout`].

pub mod api;
pub mod color;
pub mod mapper;
pub mod output;
pub mod palette;
pub mod pass;
pub mod uniform;


pub use api::{PaletteSwap, SwapError};
pub use color::{LinearRgb, LinearRgba, Srgb};
pub use mapper::{classify, evaluate, palette_swap_fragment, resolve_index, select_index};
pub use output::SwappedImage;
pub use palette::{Palette, PaletteError, PaletteSettings, ParseColorError, PALETTE_SIZE};
pub use pass::{full_screen_pass, index_pass};
pub use uniform::{PaletteUniform, PaletteUniformAligned, UniformError, UniformLayout};
