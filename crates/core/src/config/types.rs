use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// On-disk layout of `config.toml`.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// Profile used when none is given on the command line.
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One notes tree and where its state lives. Path values may use `~`,
/// environment variables, `{{notes_root}}` and `{{state_dir}}`.
#[derive(Debug, Deserialize)]
pub struct Profile {
    pub notes_root: String,
    /// Holds the index and the staleness marker. Defaults to `~/.tm`.
    pub state_dir: Option<String>,
    pub index_file: Option<String>,
    pub stale_marker: Option<String>,
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    /// Editor command; falls back to `$EDITOR`, then `vi`.
    pub editor: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct IndexConfig {
    /// Scan pool size. Defaults to the available parallelism.
    pub workers: Option<usize>,
    /// Bound of the channel between scan workers and the collector.
    pub channel_capacity: Option<usize>,
    /// Log and skip unreadable notes instead of aborting the rebuild.
    pub skip_unreadable: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Level for the log file; `level` when unset.
    pub file_level: Option<String>,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file_level: None, file: None }
    }
}

/// A profile with every path expanded and every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub notes_root: PathBuf,
    pub state_dir: PathBuf,
    pub index_file: PathBuf,
    pub stale_marker: PathBuf,
    /// Relative to `notes_root`, or absolute paths inside it.
    pub excluded_folders: Vec<PathBuf>,
    pub editor: String,
    pub workers: usize,
    pub channel_capacity: usize,
    pub skip_unreadable: bool,
    pub logging: LoggingConfig,
}
