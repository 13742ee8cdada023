//! Tracing setup
//!
//! The UI owns the terminal while it runs, so logs never go to stderr. They are
//! appended to `--log-file` if given, else to `<state dir>/notewall/notewall.log`.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "notewall=info";

/// `<state dir>/notewall/notewall.log`, falling back to the cache dir
pub fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("notewall").join("notewall.log"))
}

/// Log file to use: the explicit one, else the default location
pub fn log_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(default_log_path)
}

/// Open `path` for appending, creating missing parent directories
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Registry with `filter`, writing plain text to `file`. Without a file events are dropped.
pub fn subscriber(filter: EnvFilter, file: Option<File>) -> impl tracing::Subscriber + Send + Sync + 'static {
    let fmt = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });
    tracing_subscriber::registry().with(filter).with(fmt)
}

/// Install the global subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let file = path.map(open_log_file).transpose()?;
    subscriber(filter, file).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/wall.log");
        assert_eq!(log_path(Some(path.clone())), Some(path));
    }

    #[test]
    fn test_default_path_is_a_file() {
        if let Some(path) = log_path(None) {
            assert!(path.ends_with("notewall/notewall.log"));
        }
    }

    #[test]
    fn test_open_creates_parent_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("notewall.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "earlier\n").unwrap();

        open_log_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\n");

        let fresh = dir.path().join("a").join("b").join("notewall.log");
        open_log_file(&fresh).unwrap();
        assert!(fresh.exists());
    }

    #[test]
    fn test_events_are_written_to_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notewall.log");
        let file = open_log_file(&path).unwrap();

        let subscriber = subscriber(EnvFilter::new(DEFAULT_FILTER), Some(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Loaded 3 notes");
            tracing::debug!("filtered out");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Loaded 3 notes"));
        assert!(!content.contains("filtered out"));
        assert!(!content.contains('\x1b'));
    }
}
