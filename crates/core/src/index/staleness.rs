//! Staleness marker: a sentinel file meaning "the index may be behind the notes".

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StalenessError {
    #[error("failed to create staleness marker {path}: {source}")]
    Mark {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove staleness marker {path}: {source}")]
    Clear {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to the marker file. Cheap to construct; holds no file open.
#[derive(Debug, Clone)]
pub struct StalenessMarker {
    path: PathBuf,
}

impl StalenessMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the index is known to be out of date.
    pub fn is_stale(&self) -> bool {
        self.path.is_file()
    }

    /// Flag the index as out of date. Idempotent.
    pub fn mark(&self) -> Result<(), StalenessError> {
        if self.is_stale() {
            return Ok(());
        }
        let err = |source| StalenessError::Mark {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(err)?;
        }
        File::create(&self.path).map_err(err)?;
        tracing::debug!(marker = %self.path.display(), "index marked stale");
        Ok(())
    }

    /// Remove the marker after a successful rebuild. A missing marker is fine.
    pub fn clear(&self) -> Result<(), StalenessError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => {
                Err(StalenessError::Clear { path: self.path.display().to_string(), source })
            }
        }
    }
}
