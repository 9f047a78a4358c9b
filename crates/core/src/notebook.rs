//! High-level access to a notes tree: keep the index fresh, resolve queries,
//! read notes for display.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ResolvedConfig;
use crate::index::{
    BuilderError, IndexBuilder, IndexSettings, IndexStats, IndexStore, ProgressCallback,
    StalenessError, StalenessMarker, StoreError,
};
use crate::resolve::{Resolution, ResolveError, Resolver};
use crate::vault::NOTE_EXTENSION;

#[derive(Debug, Error)]
pub enum NotebookError {
    #[error(transparent)]
    Build(#[from] BuilderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Staleness(#[from] StalenessError),

    #[error("note {0} no longer exists; the index will be rebuilt on the next lookup")]
    NoteMissing(String),

    #[error("failed to read note {path}: {source}")]
    ReadNote {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A notes tree together with its index and staleness marker.
#[derive(Debug, Clone)]
pub struct Notebook {
    config: ResolvedConfig,
    settings: IndexSettings,
}

impl Notebook {
    pub fn new(config: ResolvedConfig) -> Self {
        let settings = IndexSettings::from(&config);
        Self { config, settings }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn marker(&self) -> StalenessMarker {
        StalenessMarker::new(&self.config.stale_marker)
    }

    /// The index is rebuilt when the marker is set or no index exists yet.
    pub fn needs_rebuild(&self) -> bool {
        self.marker().is_stale() || !self.config.index_file.is_file()
    }

    /// Rebuild the index unconditionally.
    pub fn rebuild(
        &self,
        progress: Option<ProgressCallback>,
    ) -> Result<IndexStats, NotebookError> {
        Ok(IndexBuilder::new(&self.settings).rebuild(progress)?)
    }

    /// Rebuild only if [`needs_rebuild`](Self::needs_rebuild) says so.
    pub fn refresh_if_stale(&self) -> Result<Option<IndexStats>, NotebookError> {
        if !self.needs_rebuild() {
            return Ok(None);
        }
        tracing::debug!("index is stale, rebuilding");
        self.rebuild(None).map(Some)
    }

    pub fn load_store(&self) -> Result<IndexStore, NotebookError> {
        Ok(IndexStore::load(&self.config.index_file)?)
    }

    /// Refresh the index if needed, then resolve `query`.
    pub fn resolve<S: AsRef<str>>(&self, query: &[S]) -> Result<Resolution, NotebookError> {
        self.refresh_if_stale()?;
        let resolver = Resolver::new(&self.config.notes_root, &self.config.index_file);
        Ok(resolver.resolve(query)?)
    }

    /// Absolute path of the note `rel` (`work/meeting` -> `<root>/work/meeting.md`).
    pub fn note_path(&self, rel: &str) -> PathBuf {
        self.config.notes_root.join(format!("{rel}.{NOTE_EXTENSION}"))
    }

    pub fn folder_path(&self, rel: &str) -> PathBuf {
        self.config.notes_root.join(rel)
    }

    /// Flag the index as stale after a note was created or edited.
    pub fn mark_edited(&self) -> Result<(), NotebookError> {
        Ok(self.marker().mark()?)
    }

    /// Read the section of note `rel` delimited by lines starting with `delim`.
    ///
    /// A note listed in the index may have been deleted by hand. In that case
    /// the index is marked stale and [`NotebookError::NoteMissing`] is returned.
    pub fn read_section(&self, rel: &str, delim: &str) -> Result<String, NotebookError> {
        let path = self.note_path(rel);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(section(&text, delim)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(note = rel, "indexed note is missing on disk");
                self.mark_edited()?;
                Err(NotebookError::NoteMissing(rel.to_string()))
            }
            Err(source) => {
                Err(NotebookError::ReadNote { path: path.display().to_string(), source })
            }
        }
    }
}

/// The lines after the first line starting with `delim`, up to the next one.
/// Without any delimiter line, the whole text.
pub fn section(text: &str, delim: &str) -> String {
    let mut out = String::new();
    let mut found = false;
    for line in text.lines() {
        if line.starts_with(delim) {
            if found {
                break;
            }
            found = true;
            out.clear();
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use crate::resolve::ResolutionKind;
    use tempfile::TempDir;

    fn write(path: PathBuf, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn notebook(dir: &TempDir) -> Notebook {
        let state = dir.path().join("state");
        Notebook::new(ResolvedConfig {
            active_profile: "default".into(),
            notes_root: dir.path().join("notes"),
            index_file: state.join("index"),
            stale_marker: state.join("update-index"),
            state_dir: state,
            excluded_folders: Vec::new(),
            editor: "true".into(),
            workers: 2,
            channel_capacity: 8,
            skip_unreadable: false,
            logging: LoggingConfig::default(),
        })
    }

    #[test]
    fn test_first_resolve_builds_index() {
        let dir = TempDir::new().unwrap();
        let nb = notebook(&dir);
        write(nb.note_path("work/meeting"), "tags: project, urgent\n");

        assert!(nb.needs_rebuild());
        let r = nb.resolve(&["urgent"]).unwrap();

        assert_eq!(r.kind, ResolutionKind::TagFile);
        assert_eq!(r.files, ["work/meeting"]);
        assert!(!nb.needs_rebuild());
    }

    #[test]
    fn test_edit_marks_stale_and_next_resolve_sees_change() {
        let dir = TempDir::new().unwrap();
        let nb = notebook(&dir);
        write(nb.note_path("work/meeting"), "tags: project\n");
        assert!(nb.resolve(&["urgent"]).unwrap().is_nothing());

        write(nb.note_path("work/meeting"), "tags: project, urgent\n");
        nb.mark_edited().unwrap();
        assert!(nb.needs_rebuild());

        let r = nb.resolve(&["urgent"]).unwrap();
        assert_eq!(r.kind, ResolutionKind::TagFile);
        assert!(!nb.marker().is_stale());
    }

    #[test]
    fn test_refresh_skips_fresh_index() {
        let dir = TempDir::new().unwrap();
        let nb = notebook(&dir);
        write(nb.note_path("a"), "tags: x\n");

        assert!(nb.refresh_if_stale().unwrap().is_some());
        assert!(nb.refresh_if_stale().unwrap().is_none());
    }

    #[test]
    fn test_missing_notes_root_is_reported() {
        let dir = TempDir::new().unwrap();
        let nb = notebook(&dir);

        let err = nb.resolve(&["anything"]).unwrap_err();
        assert!(matches!(err, NotebookError::Build(BuilderError::Walker(_))));
    }

    #[test]
    fn test_read_section_of_deleted_note_marks_stale() {
        let dir = TempDir::new().unwrap();
        let nb = notebook(&dir);
        write(nb.note_path("gone"), "tags: x\n");
        nb.rebuild(None).unwrap();
        fs::remove_file(nb.note_path("gone")).unwrap();

        let err = nb.read_section("gone", "## ").unwrap_err();
        assert!(matches!(err, NotebookError::NoteMissing(_)));
        assert!(nb.marker().is_stale());
    }

    #[test]
    fn test_read_section() {
        let dir = TempDir::new().unwrap();
        let nb = notebook(&dir);
        write(nb.note_path("rust"), "tags: lang\n## Usage\ncargo run\n## More\nlater\n");

        assert_eq!(nb.read_section("rust", "## ").unwrap(), "cargo run\n");
    }

    #[test]
    fn test_section_without_delimiter_is_whole_text() {
        assert_eq!(section("a\nb\n", "## "), "a\nb\n");
    }

    #[test]
    fn test_section_runs_to_end_after_single_delimiter() {
        assert_eq!(section("intro\n## One\nx\ny", "## "), "x\ny\n");
    }
}
