//! Enumerates candidate note files under the notes root.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into, besides hidden ones.
const SKIPPED_DIRS: [&str; 2] = ["node_modules", "target"];

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("notes root does not exist: {0}")]
    MissingRoot(String),

    #[error("notes root is not a directory: {0}")]
    NotADirectory(String),

    #[error("failed to walk notes directory {root}: {source}")]
    Traverse {
        root: String,
        #[source]
        source: walkdir::Error,
    },
}

/// A non-directory entry found under the notes root.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    pub absolute_path: PathBuf,
    /// Path relative to the notes root.
    pub relative_path: PathBuf,
}

/// Lists every file under the notes root; the scanner decides which are notes.
///
/// Hidden directories, tooling directories and configured exclusions are
/// pruned; hidden files such as `.draft.md` are still reported.
/// Symlinks are not followed. A symlink is reported unless it points at a
/// directory, so a dangling link shows up and fails when scanned.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
    excluded: Vec<PathBuf>,
}

impl VaultWalker {
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Exclusions may be relative to the root (`archive/2019`) or absolute
    /// paths inside it, spelled through the configured root or its canonical
    /// form.
    pub fn with_exclusions(
        root: &Path,
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultWalkerError> {
        let canonical = match root.canonicalize() {
            Ok(canonical) if canonical.is_dir() => canonical,
            Ok(canonical) => {
                return Err(VaultWalkerError::NotADirectory(canonical.display().to_string()));
            }
            Err(_) => return Err(VaultWalkerError::MissingRoot(root.display().to_string())),
        };

        let excluded = excluded_folders
            .into_iter()
            .map(|folder| exclusion_under(root, &canonical, folder))
            .collect();

        Ok(Self { root: canonical, excluded })
    }

    /// Files in depth-first order, siblings sorted by name.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, VaultWalkerError> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.prunes(entry))
            .filter_map(|entry| self.file_entry(entry).transpose())
            .collect()
    }

    /// The canonical notes root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_entry(
        &self,
        entry: walkdir::Result<DirEntry>,
    ) -> Result<Option<WalkedFile>, VaultWalkerError> {
        let entry = entry.map_err(|source| VaultWalkerError::Traverse {
            root: self.root.display().to_string(),
            source,
        })?;

        let kind = entry.file_type();
        if kind.is_dir() || (kind.is_symlink() && entry.path().is_dir()) {
            return Ok(None);
        }

        let absolute_path = entry.into_path();
        let relative_path = relative_to(&self.root, absolute_path.clone());
        Ok(Some(WalkedFile { absolute_path, relative_path }))
    }

    fn prunes(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir()
            && (name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()))
        {
            return true;
        }
        entry
            .path()
            .strip_prefix(&self.root)
            .is_ok_and(|rel| self.excluded.iter().any(|folder| rel.starts_with(folder)))
    }
}

/// Exclusion relative to the canonical root. Absolute folders outside both
/// spellings of the root are resolved through symlinks; failing that they
/// are kept as given and never match.
fn exclusion_under(configured: &Path, canonical: &Path, folder: PathBuf) -> PathBuf {
    if folder.is_relative() {
        return folder;
    }
    for base in [canonical, configured] {
        if let Ok(rel) = folder.strip_prefix(base) {
            return rel.to_path_buf();
        }
    }
    match folder.canonicalize() {
        Ok(real) => relative_to(canonical, real),
        Err(_) => folder,
    }
}

fn relative_to(root: &Path, path: PathBuf) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path,
    }
}
