//! Public API: the [`PaletteSwap`] builder and the [`SwapError`] type.

mod builder;
mod error;

pub use builder::PaletteSwap;
pub use error::SwapError;
