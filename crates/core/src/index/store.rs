//! In-memory lookup structures loaded from the index file.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

use crate::tags::format_tag;
use crate::vault::{ContentHash, path_hash};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index file not found at {0} (rebuild the index first)")]
    Missing(String),

    #[error("failed to read index file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Tag lookup tables, rebuilt wholesale from the index on every load.
///
/// Each index line is `path,tag1,tag2,...`; tags are normalized here, not
/// when the index is written. Resolution reads `tag_to_paths`, so two notes
/// whose fingerprints collide are still told apart. `hash_to_path` and
/// `tag_to_hashes` serve library callers that address notes by
/// [`ContentHash`]; the resolver only uses fingerprints for deduplication.
#[derive(Debug, Default, Clone)]
pub struct IndexStore {
    hash_to_path: HashMap<ContentHash, String>,
    tag_to_hashes: HashMap<String, Vec<ContentHash>>,
    tag_to_paths: HashMap<String, Vec<String>>,
}

impl IndexStore {
    /// Load the index file at `path`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::Missing(path.display().to_string()),
            _ => StoreError::Read { path: path.display().to_string(), source: e },
        })?;
        let store = Self::parse(&text);
        tracing::debug!(
            index = %path.display(),
            notes = store.note_count(),
            tags = store.tag_count(),
            "loaded index"
        );
        Ok(store)
    }

    /// Build the tables from index text.
    pub fn parse(text: &str) -> Self {
        let mut store = Self::default();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',');
            let note = fields.next().unwrap_or_default();
            if note.is_empty() {
                tracing::warn!(line, "index line without a note path, ignoring");
                continue;
            }
            let tags: Vec<String> =
                fields.map(format_tag).filter(|t| !t.is_empty()).collect();
            store.insert(note, tags);
        }
        store
    }

    fn insert(&mut self, note: &str, tags: Vec<String>) {
        let hash = path_hash(note);
        if let Some(previous) = self.hash_to_path.insert(hash, note.to_string())
            && previous != note
        {
            tracing::warn!(%hash, %previous, note, "fingerprint collision between notes");
        }
        for tag in tags {
            self.tag_to_hashes.entry(tag.clone()).or_default().push(hash);
            self.tag_to_paths.entry(tag).or_default().push(note.to_string());
        }
    }

    /// Paths of notes carrying the normalized `tag`, in discovery order.
    /// May contain duplicates if the index lists a note twice.
    pub fn paths_for_tag(&self, tag: &str) -> Option<&[String]> {
        self.tag_to_paths.get(tag).map(Vec::as_slice)
    }

    /// Fingerprints of notes carrying the normalized `tag`, in discovery order.
    /// Not used by resolution, which goes through [`Self::paths_for_tag`].
    pub fn hashes_for_tag(&self, tag: &str) -> Option<&[ContentHash]> {
        self.tag_to_hashes.get(tag).map(Vec::as_slice)
    }

    /// Note path for a fingerprint. On collision the later index line wins.
    pub fn path_for_hash(&self, hash: ContentHash) -> Option<&str> {
        self.hash_to_path.get(&hash).map(String::as_str)
    }

    /// All normalized tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag_to_paths.keys().map(String::as_str)
    }

    pub fn note_count(&self) -> usize {
        self.hash_to_path.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tag_to_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hash_to_path.is_empty()
    }
}
