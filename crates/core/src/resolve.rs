//! Query resolution: turn path segments into concrete notes.
//!
//! A query is a list of path segments such as `["work", "urgent"]`. All but
//! the last segment name a folder under the notes root and scope the search;
//! the last one names a note, a folder, or a tag. Stages run in priority
//! order and the first one that decides wins:
//!
//! 1. Exact note file (`work/urgent.md`)
//! 2. Exact folder (`work/urgent/`)
//! 3. Exact tag match under the folder prefix
//! 4. Fuzzy (substring) tag match under the folder prefix
//!
//! The index is only loaded when the tag stages are reached.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::index::{IndexStore, StoreError};
use crate::tags::format_tag;
use crate::vault::{ContentHash, NOTE_EXTENSION, path_hash};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Classification of a query's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionKind {
    /// Nothing matched.
    Nothing,
    /// The query named an existing note file.
    File,
    /// The query named an existing folder.
    Folder,
    /// Exactly one note matched by tag.
    TagFile,
    /// Several notes matched by tag.
    TagFiles,
}

impl ResolutionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nothing => "NOTHING",
            Self::File => "FILE",
            Self::Folder => "FOLDER",
            Self::TagFile => "TAG_FILE",
            Self::TagFiles => "TAG_FILES",
        }
    }
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving a query.
///
/// `files` holds root-relative paths without extension. For tag matches the
/// order follows the index and is not stable across rebuilds; sort if a
/// stable order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub kind: ResolutionKind,
    pub files: Vec<String>,
}

impl Resolution {
    pub fn nothing() -> Self {
        Self { kind: ResolutionKind::Nothing, files: Vec::new() }
    }

    fn single(kind: ResolutionKind, file: String) -> Self {
        Self { kind, files: vec![file] }
    }

    /// Classify a set of tag matches by its size.
    fn from_tag_matches(files: Vec<String>) -> Self {
        let kind = match files.len() {
            0 => ResolutionKind::Nothing,
            1 => ResolutionKind::TagFile,
            _ => ResolutionKind::TagFiles,
        };
        Self { kind, files }
    }

    pub fn is_nothing(&self) -> bool {
        self.kind == ResolutionKind::Nothing
    }
}

/// Resolves queries against the notes root and its index file.
pub struct Resolver<'a> {
    root: &'a Path,
    index_file: &'a Path,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver.
    pub fn new(root: &'a Path, index_file: &'a Path) -> Self {
        Self { root, index_file }
    }

    /// Resolve `query`, loading the index only if a tag stage is reached.
    ///
    /// The resolver never rebuilds; callers check the staleness marker first.
    pub fn resolve<S: AsRef<str>>(&self, query: &[S]) -> Result<Resolution, ResolveError> {
        match self.resolve_path(query) {
            PathOutcome::Decided(resolution) => Ok(resolution),
            PathOutcome::SearchTags { prefix, tag } => {
                let store = IndexStore::load(self.index_file)?;
                Ok(match_tags(&store, &prefix, &tag))
            }
        }
    }

    /// Filesystem stages: empty query, prefix folder, exact file, exact folder.
    fn resolve_path<S: AsRef<str>>(&self, query: &[S]) -> PathOutcome {
        let Some(segments) = split_segments(query) else {
            tracing::debug!("query escapes the notes root");
            return PathOutcome::Decided(Resolution::nothing());
        };
        let Some((tag, folders)) = segments.split_last() else {
            return PathOutcome::Decided(Resolution::nothing());
        };

        let prefix = folders.join("/");
        if !self.root.join(&prefix).is_dir() {
            tracing::debug!(%prefix, "prefix folder does not exist");
            return PathOutcome::Decided(Resolution::nothing());
        }

        let joined = segments.join("/");
        let note_file = self.root.join(format!("{joined}.{NOTE_EXTENSION}"));
        if note_file.is_file() {
            return PathOutcome::Decided(Resolution::single(ResolutionKind::File, joined));
        }
        if self.root.join(&joined).is_dir() {
            return PathOutcome::Decided(Resolution::single(ResolutionKind::Folder, joined));
        }

        tracing::debug!(%joined, "no exact file or folder, searching tags");
        PathOutcome::SearchTags { prefix, tag: tag.to_string() }
    }
}

enum PathOutcome {
    Decided(Resolution),
    SearchTags { prefix: String, tag: String },
}

/// Flatten segments on `/` and drop empty parts. `None` if any part is `.`
/// or `..`, which would let a query reach outside the notes root.
fn split_segments<S: AsRef<str>>(query: &[S]) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for part in query.iter().flat_map(|s| s.as_ref().split('/')) {
        match part {
            "" => {}
            "." | ".." => return None,
            _ => segments.push(part),
        }
    }
    Some(segments)
}

/// Tag stages. An exact key short-circuits the fuzzy scan even when none of
/// its notes lie under `prefix`.
fn match_tags(store: &IndexStore, prefix: &str, tag: &str) -> Resolution {
    let tag = format_tag(tag);
    if tag.is_empty() {
        return Resolution::nothing();
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    if let Some(paths) = store.paths_for_tag(&tag) {
        collect_under(paths, prefix, &mut seen, &mut files);
        tracing::debug!(%tag, matches = files.len(), "exact tag match");
        return Resolution::from_tag_matches(files);
    }

    let mut keys: Vec<&str> = store.tags().filter(|k| k.contains(tag.as_str())).collect();
    keys.sort_unstable();
    for key in keys {
        if let Some(paths) = store.paths_for_tag(key) {
            collect_under(paths, prefix, &mut seen, &mut files);
        }
    }
    tracing::debug!(%tag, matches = files.len(), "fuzzy tag match");
    Resolution::from_tag_matches(files)
}

/// Append the paths under `prefix` not collected yet in this call. A repeated
/// fingerprint is confirmed against the collected paths before dropping.
fn collect_under(
    paths: &[String],
    prefix: &str,
    seen: &mut HashSet<ContentHash>,
    files: &mut Vec<String>,
) {
    for path in paths.iter().filter(|path| is_under(path, prefix)) {
        if seen.insert(path_hash(path)) || !files.contains(path) {
            files.push(path.clone());
        }
    }
}

/// Component-wise prefix test: `work` contains `work/a` but not `workshop/a`.
fn is_under(path: &str, prefix: &str) -> bool {
    prefix.is_empty() || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}
