use std::{
    fs, io,
    num::ParseIntError,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("I/O error on watermark file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("watermark file {path} holds {content:?}, expected a unix timestamp")]
    Malformed {
        path: PathBuf,
        content: String,
        #[source]
        source: ParseIntError,
    },
}

/// Flat-file cursor holding the creation time of the newest relayed question.
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or blank file reads as 0.
    pub fn read(&self) -> Result<u64, WatermarkError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No watermark file, starting from 0");
                return Ok(0);
            }
            Err(source) => {
                return Err(WatermarkError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let content = raw.trim();
        if content.is_empty() {
            return Ok(0);
        }

        content
            .parse::<u64>()
            .map_err(|source| WatermarkError::Malformed {
                path: self.path.clone(),
                content: content.to_string(),
                source,
            })
    }

    pub fn write(&self, value: u64) -> Result<(), WatermarkError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| WatermarkError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, value.to_string()).map_err(|source| WatermarkError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), watermark = value, "Watermark persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let store = WatermarkStore::new(dir.path().join("state.txt"));

        assert_eq!(store.read().unwrap(), 0);
    }

    #[test]
    fn empty_file_reads_as_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.txt");
        fs::write(&path, "").unwrap();

        assert_eq!(WatermarkStore::new(&path).read().unwrap(), 0);

        fs::write(&path, " \n").unwrap();
        assert_eq!(WatermarkStore::new(&path).read().unwrap(), 0);
    }

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let store = WatermarkStore::new(dir.path().join("state.txt"));

        store.write(1_718_000_123).unwrap();

        assert_eq!(store.read().unwrap(), 1_718_000_123);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "1718000123");
    }

    #[test]
    fn write_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = WatermarkStore::new(dir.path().join("state.txt"));

        store.write(1_718_000_123).unwrap();
        store.write(42).unwrap();

        assert_eq!(store.read().unwrap(), 42);
    }

    #[test]
    fn trailing_newline_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.txt");
        fs::write(&path, "1700000000\n").unwrap();

        assert_eq!(WatermarkStore::new(&path).read().unwrap(), 1_700_000_000);
    }

    #[test]
    fn non_numeric_content_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.txt");
        fs::write(&path, "yesterday").unwrap();

        let err = WatermarkStore::new(&path).read().unwrap_err();

        match err {
            WatermarkError::Malformed { content, .. } => assert_eq!(content, "yesterday"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let store = WatermarkStore::new(dir.path().join("nested/deeper/state.txt"));

        store.write(7).unwrap();

        assert_eq!(store.read().unwrap(), 7);
    }
}
