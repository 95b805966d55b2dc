//! Configuration file watcher for hot-reloading.
//!
//! Watches the loaded configuration file and hands every successfully parsed
//! revision to a callback, which forwards it to the coordinator as a
//! settings change.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::{ShadeConfig, get_config_path, load_config_from_path};

/// Debounce duration for config file changes.
/// Some editors trigger multiple events per save (write to temp, rename, etc.).
const CONFIG_DEBOUNCE_MS: u64 = 200;

/// Drops events that arrive within the debounce window of the last accepted one.
#[derive(Debug)]
pub struct ConfigWatcher {
    last_event: Option<Instant>,
    window: Duration,
}

impl Default for ConfigWatcher {
    fn default() -> Self { Self::new(Duration::from_millis(CONFIG_DEBOUNCE_MS)) }
}

impl ConfigWatcher {
    #[must_use]
    pub const fn new(window: Duration) -> Self { Self { last_event: None, window } }

    /// Whether an event at `now` should trigger a reload.
    pub fn accept(&mut self, now: Instant) -> bool {
        if self.last_event.is_some_and(|t| now.duration_since(t) < self.window) {
            return false;
        }
        self.last_event = Some(now);
        true
    }
}

/// Starts watching the loaded configuration file.
///
/// Returns `false` when no file was loaded and there is nothing to watch.
pub fn watch_config_file<F>(on_reload: F) -> bool
where
    F: Fn(ShadeConfig) + Send + 'static,
{
    let Some(config_path) = get_config_path().cloned() else {
        return false;
    };
    watch_path(config_path, on_reload);
    true
}

fn affects(event: &notify::Event, filename: &std::ffi::OsStr) -> bool {
    event.paths.iter().any(|p| p.file_name().is_some_and(|name| name == filename))
}

fn reload(path: &Path) -> Option<ShadeConfig> {
    match load_config_from_path(path) {
        Ok((config, _)) => Some(config),
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "ignoring invalid configuration");
            None
        }
    }
}

/// Watches `config_path` on a background thread.
pub fn watch_path<F>(config_path: PathBuf, on_reload: F)
where
    F: Fn(ShadeConfig) + Send + 'static,
{
    let config_filename =
        config_path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();

    std::thread::spawn(move || {
        let (tx, rx) = std::sync::mpsc::channel();

        let mut watcher: RecommendedWatcher = match notify::recommended_watcher(tx) {
            Ok(w) => w,
            Err(err) => {
                tracing::warn!(error = %err, "failed to create config watcher");
                return;
            }
        };

        // Watch the parent directory to catch editors that save by renaming
        let watch_path = config_path.parent().unwrap_or(&config_path);

        if let Err(err) = watcher.watch(watch_path, RecursiveMode::NonRecursive) {
            tracing::warn!(error = %err, "failed to watch config file");
            return;
        }
        tracing::debug!(path = %config_path.display(), "watching configuration");

        let mut debounce = ConfigWatcher::default();

        loop {
            match rx.recv() {
                Ok(Ok(event)) => {
                    if !affects(&event, &config_filename) || !debounce.accept(Instant::now()) {
                        continue;
                    }
                    if let Some(config) = reload(&config_path) {
                        tracing::info!("configuration reloaded");
                        on_reload(config);
                    }
                }
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "config watch error");
                }
                // Channel closed, watcher dropped
                Err(_) => break,
            }
        }
    });
}
