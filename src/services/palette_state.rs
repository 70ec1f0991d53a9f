//! Live palette swap settings shared between requests.
//!
//! The state publishes immutable [`FrameSettings`] snapshots. Every pass
//! reads one snapshot for its whole duration, so a level change or fade
//! step arriving mid-render only affects the next frame.

use crate::models::AppConfig;
use palette_mapper::{Palette, PaletteSettings, PaletteSwap};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use utoipa::ToSchema;

/// Darkness steps covered by a full warp fade.
const FADE_STEPS: f32 = 4.0;

#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Fade fraction must be within [0, 1], got {0}")]
    InvalidFade(f32),

    #[error("{0} and {1} cannot be combined")]
    Conflict(&'static str, &'static str),
}

/// One published snapshot of the effect configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSettings {
    /// Level last entered, if any
    pub level: Option<String>,
    /// Name of the palette the colours came from
    pub palette_name: String,
    pub palette: Palette,
    pub darkness: i32,
}

impl FrameSettings {
    pub fn settings(&self) -> PaletteSettings {
        self.palette.to_settings(self.darkness)
    }

    pub fn swap(&self) -> PaletteSwap {
        PaletteSwap::new(self.palette).darkness(self.darkness)
    }
}

/// Darkness for a warp fade that is `fraction` of the way through.
pub fn fade_darkness(fraction: f32) -> i32 {
    (fraction * FADE_STEPS) as i32
}

/// A batch of changes applied under one lock. Fields are applied in order:
/// level, palette, then darkness or fade.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SettingsChange {
    /// Enter a level (switches to its palette, if it names one)
    #[serde(default)]
    pub level: Option<String>,
    /// Select a palette by name
    #[serde(default)]
    pub palette: Option<String>,
    /// Set the darkness bias directly
    #[serde(default)]
    pub darkness: Option<i32>,
    /// Warp fade progress in [0, 1]
    #[serde(default)]
    pub fade: Option<f32>,
    /// End the warp fade (darkness back to 0)
    #[serde(default)]
    pub finish_fade: bool,
}

/// Serializable view of a snapshot
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SettingsView {
    /// Level last entered
    pub level: Option<String>,
    /// Active palette name
    pub palette: String,
    /// Darkness bias
    pub darkness: i32,
    /// Palette colours as sRGB hex, brightest bucket first
    pub colours: Vec<String>,
    /// Palette colours in linear RGB as uploaded to the pass
    pub linear: Vec<Vec<f32>>,
}

impl From<&FrameSettings> for SettingsView {
    fn from(frame: &FrameSettings) -> Self {
        Self {
            level: frame.level.clone(),
            palette: frame.palette_name.clone(),
            darkness: frame.darkness,
            colours: frame.palette.to_hex_strings(),
            linear: frame
                .settings()
                .colours
                .iter()
                .map(|c| vec![c.r, c.g, c.b])
                .collect(),
        }
    }
}

struct Inner {
    config: Arc<AppConfig>,
    current: Arc<FrameSettings>,
}

/// Shared, reloadable palette state.
pub struct PaletteSwapState {
    inner: RwLock<Inner>,
}

impl PaletteSwapState {
    pub fn new(config: AppConfig) -> Self {
        let (name, palette) = config.default_palette();
        let current = FrameSettings {
            level: None,
            palette_name: name.to_string(),
            palette,
            darkness: 0,
        };
        Self {
            inner: RwLock::new(Inner {
                config: Arc::new(config),
                current: Arc::new(current),
            }),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<FrameSettings> {
        self.read().current.clone()
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.read().config.clone()
    }

    /// Switch to the palette of `level`. Levels without a palette keep the
    /// current colours but still become the active level.
    pub fn enter_level(&self, level: &str) -> Result<Arc<FrameSettings>, StateError> {
        self.update(|config, frame| enter(config, frame, level))
    }

    /// Switch to a named palette regardless of level.
    pub fn select_palette(&self, name: &str) -> Result<Arc<FrameSettings>, StateError> {
        self.update(|config, frame| select(config, frame, name))
    }

    pub fn set_darkness(&self, darkness: i32) -> Arc<FrameSettings> {
        self.publish(|frame| frame.darkness = darkness)
    }

    /// Set darkness from a warp fade `fraction` in `[0, 1]`.
    pub fn apply_fade(&self, fraction: f32) -> Result<Arc<FrameSettings>, StateError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(StateError::InvalidFade(fraction));
        }
        Ok(self.publish(|frame| frame.darkness = fade_darkness(fraction)))
    }

    /// End of a warp: back to full brightness.
    pub fn finish_fade(&self) -> Arc<FrameSettings> {
        self.publish(|frame| frame.darkness = 0)
    }

    /// Apply a batch of changes. Nothing is published if any part fails.
    pub fn apply(&self, change: &SettingsChange) -> Result<Arc<FrameSettings>, StateError> {
        let mut darkness_sources = [
            ("darkness", change.darkness.is_some()),
            ("fade", change.fade.is_some()),
            ("finish_fade", change.finish_fade),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field));
        if let (Some(first), Some(second)) = (darkness_sources.next(), darkness_sources.next()) {
            return Err(StateError::Conflict(first, second));
        }

        self.update(|config, frame| {
            if let Some(ref level) = change.level {
                enter(config, frame, level)?;
            }
            if let Some(ref name) = change.palette {
                select(config, frame, name)?;
            }
            if let Some(darkness) = change.darkness {
                frame.darkness = darkness;
            }
            if let Some(fraction) = change.fade {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(StateError::InvalidFade(fraction));
                }
                frame.darkness = fade_darkness(fraction);
            }
            if change.finish_fade {
                frame.darkness = 0;
            }
            Ok(())
        })
    }

    /// Settings for a single frame: the current snapshot with one-off
    /// overrides. The shared state is left untouched.
    pub fn frame_for(
        &self,
        palette: Option<&str>,
        level: Option<&str>,
        darkness: Option<i32>,
    ) -> Result<FrameSettings, StateError> {
        if palette.is_some() && level.is_some() {
            return Err(StateError::Conflict("palette", "level"));
        }
        let inner = self.read();
        let mut frame = (*inner.current).clone();
        if let Some(level) = level {
            enter(&inner.config, &mut frame, level)?;
        }
        if let Some(name) = palette {
            select(&inner.config, &mut frame, name)?;
        }
        if let Some(darkness) = darkness {
            frame.darkness = darkness;
        }
        Ok(frame)
    }

    /// Replace the configuration and re-resolve the active palette against
    /// it. The palette is looked up by name first, then through the active
    /// level, then the default. Darkness is kept, and so is the level unless
    /// the new configuration drops it.
    pub fn reload(&self, config: AppConfig) -> Arc<FrameSettings> {
        let mut inner = self.write();
        let mut frame = (*inner.current).clone();

        if let Some(level) = frame.level.take() {
            if config.has_level(&level) {
                frame.level = Some(level);
            } else {
                tracing::info!(%level, "Active level removed");
            }
        }

        if let Some(palette) = config.palette(&frame.palette_name) {
            frame.palette = palette;
        } else {
            let (name, palette) = frame
                .level
                .as_deref()
                .and_then(|level| config.palette_for_level(level))
                .unwrap_or_else(|| config.default_palette());
            tracing::warn!(
                removed = %frame.palette_name,
                palette = name,
                "Active palette removed"
            );
            frame.palette_name = name.to_string();
            frame.palette = palette;
        }

        tracing::info!(palettes = config.palettes.len(), "Configuration reloaded");
        inner.config = Arc::new(config);
        inner.current = Arc::new(frame);
        inner.current.clone()
    }

    fn publish(&self, change: impl FnOnce(&mut FrameSettings)) -> Arc<FrameSettings> {
        let mut inner = self.write();
        let mut frame = (*inner.current).clone();
        change(&mut frame);
        inner.current = Arc::new(frame);
        inner.current.clone()
    }

    fn update(
        &self,
        change: impl FnOnce(&AppConfig, &mut FrameSettings) -> Result<(), StateError>,
    ) -> Result<Arc<FrameSettings>, StateError> {
        let mut inner = self.write();
        let mut frame = (*inner.current).clone();
        change(&*inner.config, &mut frame)?;
        inner.current = Arc::new(frame);
        Ok(inner.current.clone())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn enter(config: &AppConfig, frame: &mut FrameSettings, level: &str) -> Result<(), StateError> {
    if !config.has_level(level) {
        return Err(StateError::UnknownLevel(level.to_string()));
    }
    if let Some((name, palette)) = config.palette_for_level(level) {
        frame.palette_name = name.to_string();
        frame.palette = palette;
    }
    frame.level = Some(level.to_string());
    tracing::debug!(level, palette = %frame.palette_name, "Entered level");
    Ok(())
}

fn select(config: &AppConfig, frame: &mut FrameSettings, name: &str) -> Result<(), StateError> {
    frame.palette = config
        .palette(name)
        .ok_or_else(|| StateError::UnknownPalette(name.to_string()))?;
    frame.palette_name = name.to_string();
    Ok(())
}
