//! Index building orchestration.
//!
//! A rebuild walks the notes root, scans every file on a bounded rayon pool
//! and funnels the resulting records through a bounded channel into a single
//! collector running on the caller's thread. The collector only concatenates
//! index lines; the lookup tables are derived later by [`IndexStore`].
//!
//! [`IndexStore`]: super::IndexStore

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;

use super::staleness::{StalenessError, StalenessMarker};
use super::types::{IndexSettings, IndexStats, ProgressCallback};
use crate::vault::{
    NoteRecord, ScanError, VaultWalker, VaultWalkerError, WalkedFile, scan_note,
};

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Notes walker error: {0}")]
    Walker(#[from] VaultWalkerError),

    #[error("Scan failed, index not written: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to start scan workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to remove old index {path}: {source}")]
    RemoveIndex {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write index {path}: {source}")]
    WriteIndex {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Staleness(#[from] StalenessError),
}

type ScanMessage<'f> = (&'f WalkedFile, Result<Option<NoteRecord>, ScanError>);

/// Builder that replaces the persisted index with a fresh scan.
pub struct IndexBuilder<'a> {
    settings: &'a IndexSettings,
}

impl<'a> IndexBuilder<'a> {
    /// Create a new index builder.
    pub fn new(settings: &'a IndexSettings) -> Self {
        Self { settings }
    }

    /// Rebuild the index from scratch.
    ///
    /// The old index is deleted before scanning starts and the new one is
    /// only written once every file has been scanned, so a failed rebuild
    /// leaves no index behind rather than a partial one.
    pub fn rebuild(
        &self,
        progress: Option<ProgressCallback>,
    ) -> Result<IndexStats, BuilderError> {
        let start = Instant::now();
        let mut stats = IndexStats::default();

        let walker = VaultWalker::with_exclusions(
            &self.settings.notes_root,
            self.settings.excluded_folders.clone(),
        )?;

        remove_index(&self.settings.index_file)?;

        let files = walker.walk()?;
        stats.files_found = files.len();
        tracing::debug!(
            root = %walker.root().display(),
            files = files.len(),
            workers = self.settings.workers,
            "scanning notes"
        );

        let buffer = self.scan_all(walker.root(), &files, progress.as_ref(), &mut stats)?;

        self.write_index(&buffer)?;
        StalenessMarker::new(&self.settings.stale_marker).clear()?;

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            files = stats.files_found,
            notes = stats.notes_indexed,
            skipped = stats.notes_skipped,
            duration_ms = stats.duration_ms,
            "index rebuilt"
        );
        Ok(stats)
    }

    /// Scan `files` in parallel and concatenate the index lines of every
    /// tagged note.
    fn scan_all(
        &self,
        root: &Path,
        files: &[WalkedFile],
        progress: Option<&ProgressCallback>,
        stats: &mut IndexStats,
    ) -> Result<String, BuilderError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.workers.max(1))
            .thread_name(|i| format!("tm-scan-{i}"))
            .build()?;

        let (tx, rx) =
            crossbeam_channel::bounded::<ScanMessage<'_>>(self.settings.channel_capacity);

        // Set by the collector on the first fatal error so workers stop early
        let cancelled = AtomicBool::new(false);
        let cancelled_ref = &cancelled;
        let pool_ref = &pool;

        let mut buffer = String::new();
        let mut failure: Option<ScanError> = None;
        let total = files.len();

        std::thread::scope(|s| {
            s.spawn(move || {
                pool_ref.install(|| {
                    files.par_iter().for_each_with(tx, |sender, file| {
                        if cancelled_ref.load(Ordering::Relaxed) {
                            return;
                        }
                        let outcome = scan_note(root, &file.absolute_path);
                        if sender.send((file, outcome)).is_err() {
                            cancelled_ref.store(true, Ordering::Relaxed);
                        }
                    });
                });
                // Every sender is dropped here, which ends the collector loop
            });

            for (current, (file, outcome)) in rx.iter().enumerate() {
                if failure.is_some() {
                    // Keep draining so no worker blocks on a full channel
                    continue;
                }
                if let Some(cb) = progress {
                    cb(current + 1, total, &file.relative_path.to_string_lossy());
                }
                match outcome {
                    Ok(Some(record)) => {
                        tracing::debug!(note = %record.path, tags = ?record.tags, "indexed");
                        buffer.push_str(&record.to_index_line());
                        stats.notes_indexed += 1;
                    }
                    Ok(None) => {}
                    Err(e) if self.settings.skip_unreadable => {
                        tracing::warn!("Skipping {}: {}", file.relative_path.display(), e);
                        stats.notes_skipped += 1;
                    }
                    Err(e) => {
                        cancelled_ref.store(true, Ordering::Relaxed);
                        failure = Some(e);
                    }
                }
            }
        });

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(buffer),
        }
    }

    /// Write the index next to its final location, then move it into place.
    fn write_index(&self, contents: &str) -> Result<(), BuilderError> {
        let index = &self.settings.index_file;
        let write_err = |source| BuilderError::WriteIndex {
            path: index.display().to_string(),
            source,
        };

        if let Some(parent) = index.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = tmp_path(index);
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, index).map_err(write_err)?;
        Ok(())
    }
}

fn remove_index(index: &Path) -> Result<(), BuilderError> {
    match fs::remove_file(index) {
        Ok(()) => {
            tracing::debug!(index = %index.display(), "removed old index");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => {
            Err(BuilderError::RemoveIndex { path: index.display().to_string(), source })
        }
    }
}

fn tmp_path(index: &Path) -> PathBuf {
    let mut name = index.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    index.with_file_name(name)
}
