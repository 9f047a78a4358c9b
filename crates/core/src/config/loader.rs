use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::{env, fs, thread};

use thiserror::Error;

use crate::config::types::{ConfigFile, IndexConfig, LoggingConfig, Profile, ResolvedConfig};

const SUPPORTED_VERSION: u32 = 1;
const DEFAULT_PROFILE: &str = "default";
const DEFAULT_STATE_DIR: &str = "~/.tm";
const DEFAULT_INDEX_FILE: &str = "{{state_dir}}/index";
const DEFAULT_STALE_MARKER: &str = "{{state_dir}}/update-index";
const DEFAULT_CHANNEL_CAPACITY: usize = 256;
const DEFAULT_EDITOR: &str = "vi";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file at {0}")]
    NotFound(String),

    #[error("cannot read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("invalid TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' is not defined")]
    ProfileNotFound(String),

    #[error("config defines no profiles")]
    NoProfiles,

    #[error("config version {0} is not supported (expected 1)")]
    BadVersion(u32),

    #[error("cannot expand '{value}': {source}")]
    Expand {
        value: String,
        #[source]
        source: shellexpand::LookupError<env::VarError>,
    },

    #[error("index.workers must be at least 1")]
    InvalidWorkers,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Read the config at `config_path` (or the default location) and resolve
    /// `profile_override`, falling back to the file's `profile`, then `default`.
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
        let file = read_config(&path)?;

        let active = profile_override
            .or(file.profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
            .to_string();
        let profile = file
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        let resolved = resolve(active.clone(), profile, &file.index, &file.logging)?;
        tracing::debug!(
            config = %path.display(),
            profile = %active,
            notes_root = %resolved.notes_root.display(),
            "configuration loaded"
        );
        Ok(resolved)
    }
}

/// `$XDG_CONFIG_HOME/tagmark/config.toml`, else `~/.config/tagmark/config.toml`.
pub fn default_config_path() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("tagmark").join("config.toml")
}

fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let shown = || path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound(shown()),
        _ => ConfigError::ReadError(shown(), e),
    })?;

    let file: ConfigFile =
        toml::from_str(&text).map_err(|e| ConfigError::ParseError(shown(), e))?;

    if file.version != SUPPORTED_VERSION {
        return Err(ConfigError::BadVersion(file.version));
    }
    if file.profiles.is_empty() {
        return Err(ConfigError::NoProfiles);
    }
    Ok(file)
}

fn resolve(
    active_profile: String,
    profile: &Profile,
    index: &IndexConfig,
    logging: &LoggingConfig,
) -> Result<ResolvedConfig, ConfigError> {
    let notes_root = expand_path(&profile.notes_root)?;
    let state_dir = expand_path(profile.state_dir.as_deref().unwrap_or(DEFAULT_STATE_DIR))?;
    let vars = Placeholders {
        notes_root: notes_root.to_string_lossy().into_owned(),
        state_dir: state_dir.to_string_lossy().into_owned(),
    };

    let index_file = vars.expand(profile.index_file.as_deref().unwrap_or(DEFAULT_INDEX_FILE))?;
    let stale_marker =
        vars.expand(profile.stale_marker.as_deref().unwrap_or(DEFAULT_STALE_MARKER))?;
    let excluded_folders = profile
        .excluded_folders
        .iter()
        .map(|folder| vars.expand(folder))
        .collect::<Result<Vec<_>, _>>()?;

    let log_file = match &logging.file {
        Some(file) => Some(vars.expand(&file.to_string_lossy())?),
        None => None,
    };

    let editor = profile
        .editor
        .clone()
        .or_else(|| env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

    let workers = match index.workers {
        Some(0) => return Err(ConfigError::InvalidWorkers),
        Some(n) => n,
        None => thread::available_parallelism().map_or(1, NonZeroUsize::get),
    };

    Ok(ResolvedConfig {
        active_profile,
        notes_root,
        state_dir,
        index_file,
        stale_marker,
        excluded_folders,
        editor,
        workers,
        channel_capacity: index.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY),
        skip_unreadable: index.skip_unreadable,
        logging: LoggingConfig { file: log_file, ..logging.clone() },
    })
}

/// `{{notes_root}}` and `{{state_dir}}` substitution ahead of shell expansion.
struct Placeholders {
    notes_root: String,
    state_dir: String,
}

impl Placeholders {
    fn expand(&self, raw: &str) -> Result<PathBuf, ConfigError> {
        let substituted = raw
            .replace("{{notes_root}}", &self.notes_root)
            .replace("{{state_dir}}", &self.state_dir);
        expand_path(&substituted)
    }
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::full(input)
        .map_err(|source| ConfigError::Expand { value: input.to_string(), source })?;
    Ok(PathBuf::from(expanded.into_owned()))
}
