//! Tag index for fast lookups on notes.
//!
//! This module provides:
//! - A concurrent builder that scans the notes root and persists a flat index
//!   file, one `path,tag1,tag2,...` line per tagged note
//! - An in-memory store that loads the index into tag lookup tables
//! - A staleness marker that records when the index is behind the notes
//!
//! # Example
//!
//! ```no_run
//! use tagmark_core::index::{IndexBuilder, IndexSettings, IndexStore};
//!
//! let settings = IndexSettings::new("/home/me/notes", "/home/me/.tm/index", "/home/me/.tm/update-index");
//! IndexBuilder::new(&settings).rebuild(None).unwrap();
//!
//! let store = IndexStore::load(&settings.index_file).unwrap();
//! let urgent = store.paths_for_tag("urgent");
//! ```

pub mod builder;
pub mod staleness;
pub mod store;
pub mod types;

pub use builder::{BuilderError, IndexBuilder};
pub use staleness::{StalenessError, StalenessMarker};
pub use store::{IndexStore, StoreError};
pub use types::{IndexSettings, IndexStats, ProgressCallback};
