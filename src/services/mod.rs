pub mod file_watcher;
pub mod palette_state;
pub mod renderer;

pub use file_watcher::{ConfigChangeEvent, ConfigWatcher};
pub use palette_state::{
    fade_darkness, FrameSettings, PaletteSwapState, SettingsChange, SettingsView, StateError,
};
pub use renderer::RenderService;
