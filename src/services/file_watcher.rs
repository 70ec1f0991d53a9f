//! Config file watcher for dev mode.
//!
//! Watches the directory holding the config file (editors often replace the
//! file instead of writing it in place) and broadcasts a debounced event
//! whenever the config file itself changes.

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Event sent when the config file changed
#[derive(Debug, Clone)]
pub struct ConfigChangeEvent {
    pub path: PathBuf,
}

/// Watches a single config file
pub struct ConfigWatcher {
    sender: broadcast::Sender<ConfigChangeEvent>,
    /// Handle to the watcher (kept alive)
    _watcher: Option<RecommendedWatcher>,
    active: bool,
}

impl ConfigWatcher {
    /// Start watching `config_path`. Must be called inside a tokio runtime.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let (sender, _) = broadcast::channel(16);

        let (watcher, active) = match config_path {
            Some(path) => match Self::start_watcher(&path, sender.clone()) {
                Ok(watcher) => {
                    tracing::info!(path = %path.display(), "Config watcher started");
                    (Some(watcher), true)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to start config watcher");
                    (None, false)
                }
            },
            None => {
                tracing::debug!("No config file configured, watching disabled");
                (None, false)
            }
        };

        Self {
            sender,
            _watcher: watcher,
            active,
        }
    }

    fn start_watcher(
        path: &Path,
        sender: broadcast::Sender<ConfigChangeEvent>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, mut rx) = mpsc::channel::<()>(100);

        // Debounce: wait for a quiet period after the last raw event
        let watched = path.to_path_buf();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                loop {
                    match tokio::time::timeout(DEBOUNCE, rx.recv()).await {
                        Ok(Some(())) => continue,
                        Ok(None) => return,
                        Err(_) => break,
                    }
                }
                tracing::debug!(path = %watched.display(), "Config changed (debounced)");
                let _ = sender.send(ConfigChangeEvent {
                    path: watched.clone(),
                });
            }
        });

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    if event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()))
                    {
                        let _ = tx.blocking_send(());
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigChangeEvent> {
        self.sender.subscribe()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
