//! File logging. The terminal belongs to the UI, so logs go to a file.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use glyphclock_config::LogConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to the configured log file.
///
/// `RUST_LOG` takes precedence over the configured level. Returns the log
/// path, or `None` when no location is available.
pub fn init(config: &LogConfig) -> color_eyre::Result<Option<PathBuf>> {
    let Some(path) = config.path() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    rotate(&path, config.max_bytes)
        .wrap_err_with(|| format!("rotating log file {}", path.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("installing log subscriber: {e}"))?;

    Ok(Some(path))
}

/// Path the log is moved to when rotated.
fn rotated_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".1");
    PathBuf::from(name)
}

/// Move `path` aside when it is larger than `max_bytes`, replacing any
/// previous rotation. Returns whether the file was rotated.
pub fn rotate(path: &Path, max_bytes: u64) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > max_bytes => {
            fs::rename(path, rotated_path(path))?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_small_log_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clock.log");
        fs::write(&path, "short").unwrap();
        assert!(!rotate(&path, 1024).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_large_log_is_rotated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clock.log");
        fs::write(rotated_path(&path), "older").unwrap();
        fs::write(&path, vec![b'x'; 64]).unwrap();

        assert!(rotate(&path, 16).unwrap());
        assert!(!path.exists());
        let rotated = fs::read(dir.path().join("clock.log.1")).unwrap();
        assert_eq!(rotated.len(), 64);
    }

    #[test]
    fn test_missing_log_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(!rotate(&dir.path().join("none.log"), 0).unwrap());
    }
}
