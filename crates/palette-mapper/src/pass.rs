//! Full-screen pass: the fragment entry point run once per pixel.
//!
//! Every invocation reads one source sample and the shared settings snapshot
//! and nothing else, so pixels are evaluated in parallel with rayon. Output
//! order matches input order.

use rayon::prelude::*;

use crate::color::LinearRgba;
use crate::mapper::{palette_swap_fragment, select_index};
use crate::palette::PaletteSettings;

/// Run the palette swap over a frame of linear samples.
pub fn full_screen_pass(source: &[LinearRgba], settings: &PaletteSettings) -> Vec<LinearRgba> {
    source
        .par_iter()
        .map(|&texel| palette_swap_fragment(texel, settings))
        .collect()
}

/// Run the palette swap keeping only the selected palette slot per pixel.
pub fn index_pass(source: &[LinearRgba], darkness: i32) -> Vec<u8> {
    source
        .par_iter()
        .map(|texel| select_index(texel.r, darkness) as u8)
        .collect()
}
