//! Palette types
//!
//! [`Palette`] is the authored form (four sRGB colours, usually parsed from
//! hex strings). [`PaletteSettings`] is the configuration snapshot the palette
//! swap reads every frame: four linear colours plus the darkness bias.

mod error;
mod palette;
mod settings;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PALETTE_SIZE};
pub use settings::PaletteSettings;
