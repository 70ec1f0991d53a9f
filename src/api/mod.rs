pub mod render;
pub mod settings;

pub use render::{handle_render, RenderQuery, __path_handle_render};
pub use settings::{
    handle_get_settings, handle_palettes, handle_put_settings, LevelInfo, PaletteInfo,
    PalettesResponse,
};
pub use settings::{__path_handle_get_settings, __path_handle_palettes, __path_handle_put_settings};
