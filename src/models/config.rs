use crate::assets::AssetLoader;
use palette_mapper::{Palette, PaletteError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Palette used before any level has been entered
    #[serde(default = "default_palette_name")]
    pub default_palette: String,

    /// Named four-colour palettes
    #[serde(default)]
    pub palettes: HashMap<String, PaletteConfig>,

    /// Level to palette mappings
    #[serde(default)]
    pub levels: HashMap<String, LevelConfig>,
}

/// Name reported when the configured default palette is unusable and the
/// built-in colours are used instead.
pub const BUILTIN_PALETTE: &str = "built-in";

fn default_palette_name() -> String {
    "default".to_string()
}

/// A palette as written in the config file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Hex colours, brightest bucket first. Must be exactly four.
    pub colours: Vec<String>,
}

/// Configuration for a level
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LevelConfig {
    /// Palette to switch to when the level is entered. Levels without one
    /// keep whatever palette is active.
    #[serde(default)]
    pub palette: Option<String>,
}

impl PaletteConfig {
    pub fn parse(&self) -> Result<Palette, PaletteError> {
        Palette::from_hex(&self.colours)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        palettes = config.palettes.len(),
                        levels = config.levels.len(),
                        "Loaded configuration"
                    );
                    config.log_problems();
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Palettes that fail to parse, and levels naming unknown palettes.
    pub fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .palettes
            .iter()
            .filter_map(|(name, p)| p.parse().err().map(|e| format!("palette '{name}': {e}")))
            .collect();
        for (level, config) in &self.levels {
            if let Some(ref palette) = config.palette {
                if !self.palettes.contains_key(palette) {
                    problems.push(format!("level '{level}': unknown palette '{palette}'"));
                }
            }
        }
        if !self.palettes.contains_key(&self.default_palette) {
            problems.push(format!(
                "default palette '{}' is not defined",
                self.default_palette
            ));
        }
        problems.sort();
        problems
    }

    fn log_problems(&self) {
        for problem in self.problems() {
            tracing::warn!(%problem, "Invalid configuration entry");
        }
    }

    /// Look up and parse a palette by name. Invalid palettes are treated as
    /// missing.
    pub fn palette(&self, name: &str) -> Option<Palette> {
        let config = self.palettes.get(name)?;
        match config.parse() {
            Ok(palette) => Some(palette),
            Err(e) => {
                tracing::warn!(palette = name, %e, "Ignoring invalid palette");
                None
            }
        }
    }

    /// The configured default palette and its name, or the built-in
    /// palette under [`BUILTIN_PALETTE`] when it is missing or invalid.
    pub fn default_palette(&self) -> (&str, Palette) {
        match self.palette(&self.default_palette) {
            Some(palette) => (&self.default_palette, palette),
            None => (BUILTIN_PALETTE, Palette::default()),
        }
    }

    /// Palette name and palette a level switches to. `None` if the level
    /// has no (valid) palette.
    pub fn palette_for_level(&self, level: &str) -> Option<(&str, Palette)> {
        let name = self.levels.get(level)?.palette.as_deref()?;
        self.palette(name).map(|p| (name, p))
    }

    pub fn has_level(&self, level: &str) -> bool {
        self.levels.contains_key(level)
    }

    /// Palette names in sorted order
    pub fn palette_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.palettes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut palettes = HashMap::new();
        palettes.insert(
            default_palette_name(),
            PaletteConfig {
                colours: Palette::default().to_hex_strings(),
            },
        );

        Self {
            default_palette: default_palette_name(),
            palettes,
            levels: HashMap::new(),
        }
    }
}
