//! Note discovery and metadata extraction.
//!
//! This module provides utilities for walking the note root, scanning the
//! tag line of each markdown note, and fingerprinting note paths.

pub mod hasher;
pub mod scanner;
pub mod walker;

pub use hasher::{ContentHash, path_hash};
pub use scanner::{NOTE_EXTENSION, NoteRecord, ScanError, TAGS_MARKER, scan_note};
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};
