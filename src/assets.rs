//! Config loading with an embedded fallback
//!
//! - `CONFIG_FILE` not set: use the embedded `config.yaml` only.
//! - `CONFIG_FILE` set but the file is missing: seed it with the embedded
//!   default, then read it from disk.
//! - `CONFIG_FILE` set and present: read it from disk.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Outcome of `init`
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Loads the palette configuration from disk or from the binary.
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config path (from CONFIG_FILE)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    /// The external config path, if configured.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read the config file, falling back to the embedded copy.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        Self::embedded_config()
            .inspect(|_| tracing::trace!("Loading config from embedded assets"))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
    }

    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the embedded config to the configured path if nothing is there
    /// yet. Returns true when a file was written.
    pub fn seed_if_configured(&self) -> io::Result<bool> {
        let Some(ref path) = self.config_file else {
            return Ok(false);
        };
        if path.exists() {
            return Ok(false);
        }
        write_embedded(path)?;
        tracing::info!(path = %path.display(), "Seeded config file with embedded default");
        Ok(true)
    }

    /// Extract the embedded config to the configured path (or
    /// `./config.yaml`). Existing files are kept unless `force` is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("./{CONFIG_NAME}")));

        if path.exists() && !force {
            report.skipped.push(path.display().to_string());
        } else {
            write_embedded(&path)?;
            report.written.push(path.display().to_string());
        }
        Ok(report)
    }

    /// Names of the embedded files
    pub fn list_embedded() -> Vec<String> {
        EmbeddedConfig::iter().map(|f| f.to_string()).collect()
    }

    fn embedded_config() -> Option<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_NAME).map(|f| f.data)
    }
}

fn write_embedded(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let data = AssetLoader::embedded_config()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))?;
    fs::write(path, &*data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_present() {
        let loader = AssetLoader::new(None);
        let content = loader.read_config_string().unwrap();
        assert!(content.contains("palettes:"));
        assert_eq!(AssetLoader::list_embedded(), vec!["config.yaml".to_string()]);
    }

    #[test]
    fn test_external_config_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_palette: custom\n").unwrap();

        let loader = AssetLoader::new(Some(path));
        assert_eq!(
            loader.read_config_string().unwrap(),
            "default_palette: custom\n"
        );
    }

    #[test]
    fn test_missing_external_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(Some(dir.path().join("absent.yaml")));
        assert!(loader.read_config_string().unwrap().contains("palettes:"));
    }

    #[test]
    fn test_seed_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let loader = AssetLoader::new(Some(path.clone()));

        assert!(loader.seed_if_configured().unwrap());
        assert!(path.exists());
        assert!(!loader.seed_if_configured().unwrap());
        assert!(!AssetLoader::new(None).seed_if_configured().unwrap());
    }

    #[test]
    fn test_init_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "old").unwrap();
        let loader = AssetLoader::new(Some(path.clone()));

        let report = loader.init(false).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");

        let report = loader.init(true).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("palettes:"));
    }
}
