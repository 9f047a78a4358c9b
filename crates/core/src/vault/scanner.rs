//! Tag-line extraction from individual notes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Extension (without the dot) that marks a file as a note.
pub const NOTE_EXTENSION: &str = "md";

/// Prefix of the metadata line that declares a note's tags.
pub const TAGS_MARKER: &str = "tags:";

/// Only this many leading lines are inspected for the tags marker.
const METADATA_LINES: usize = 2;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read note {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("note {path} is outside the notes root {root}")]
    OutsideRoot { path: String, root: String },
}

/// A tagged note, ready to be written to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    /// Root-relative path with `/` separators and no extension (`work/meeting`).
    pub path: String,
    /// Tags as written on the tags line, trimmed but not normalized.
    pub tags: Vec<String>,
}

impl NoteRecord {
    /// Serialize as one index line: `path,tag1,tag2,...\n`.
    pub fn to_index_line(&self) -> String {
        let mut line = self.path.clone();
        for tag in &self.tags {
            line.push(',');
            line.push_str(tag);
        }
        line.push('\n');
        line
    }
}

/// Scan a single file under `root`.
///
/// Returns `Ok(None)` for files that are not notes, for notes without a
/// `tags:` line among their first two lines, and for notes whose path cannot
/// be stored in the index. Read failures are returned as errors.
pub fn scan_note(root: &Path, file: &Path) -> Result<Option<NoteRecord>, ScanError> {
    if !is_note_file(file) {
        return Ok(None);
    }

    let relative = file.strip_prefix(root).map_err(|_| ScanError::OutsideRoot {
        path: file.display().to_string(),
        root: root.display().to_string(),
    })?;

    let read_err = |source| ScanError::Read { path: file.display().to_string(), source };

    let mut reader = BufReader::new(File::open(file).map_err(read_err)?);
    let mut buf = Vec::new();
    let mut tags_line = None;

    for line_no in 0..METADATA_LINES {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(read_err)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let mut line = line.trim_end_matches(['\n', '\r']);
        if line_no == 0 {
            line = line.trim_start_matches('\u{feff}');
        }
        if let Some(rest) = line.strip_prefix(TAGS_MARKER) {
            tags_line = Some(rest.to_string());
            break;
        }
    }

    let Some(rest) = tags_line else {
        return Ok(None);
    };

    let path = note_id(relative);
    if path.contains([',', '\n']) {
        tracing::warn!(note = %path, "note path cannot be stored in the index, skipping");
        return Ok(None);
    }

    Ok(Some(NoteRecord { path, tags: parse_tags(&rest) }))
}

/// Split the remainder of a tags line into trimmed, non-empty tokens.
fn parse_tags(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn is_note_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == NOTE_EXTENSION)
}

/// `work/meeting.md` -> `work/meeting`, always with `/` separators.
fn note_id(relative: &Path) -> String {
    let stem: PathBuf = relative.with_extension("");
    stem.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
