pub mod config;

pub use config::{AppConfig, LevelConfig, PaletteConfig, BUILTIN_PALETTE};
