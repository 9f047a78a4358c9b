//! Index build settings and statistics.

use std::path::PathBuf;

use crate::config::ResolvedConfig;

/// Everything an index rebuild needs, detached from the config file layout.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub notes_root: PathBuf,
    pub index_file: PathBuf,
    pub stale_marker: PathBuf,
    pub excluded_folders: Vec<PathBuf>,
    /// Size of the scan worker pool. Always at least 1.
    pub workers: usize,
    /// Bound of the channel between scan workers and the collector.
    pub channel_capacity: usize,
    /// Log and skip unreadable notes instead of failing the rebuild.
    pub skip_unreadable: bool,
}

impl IndexSettings {
    /// Settings with defaults for everything but the three paths.
    pub fn new(
        notes_root: impl Into<PathBuf>,
        index_file: impl Into<PathBuf>,
        stale_marker: impl Into<PathBuf>,
    ) -> Self {
        Self {
            notes_root: notes_root.into(),
            index_file: index_file.into(),
            stale_marker: stale_marker.into(),
            excluded_folders: Vec::new(),
            workers: 4,
            channel_capacity: 256,
            skip_unreadable: false,
        }
    }
}

impl From<&ResolvedConfig> for IndexSettings {
    fn from(cfg: &ResolvedConfig) -> Self {
        Self {
            notes_root: cfg.notes_root.clone(),
            index_file: cfg.index_file.clone(),
            stale_marker: cfg.stale_marker.clone(),
            excluded_folders: cfg.excluded_folders.clone(),
            workers: cfg.workers.max(1),
            channel_capacity: cfg.channel_capacity,
            skip_unreadable: cfg.skip_unreadable,
        }
    }
}

/// Statistics from a rebuild.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of files discovered under the notes root.
    pub files_found: usize,
    /// Number of tagged notes written to the index.
    pub notes_indexed: usize,
    /// Number of unreadable notes skipped (only with `skip_unreadable`).
    pub notes_skipped: usize,
    /// Rebuild duration in milliseconds.
    pub duration_ms: u64,
}

/// Progress callback for rebuilds.
/// Parameters: (current, total, current_path)
pub type ProgressCallback = Box<dyn Fn(usize, usize, &str)>;
