//! Core library for tagmark: tag indexing and path/tag lookup over a tree of
//! markdown notes.
//!
//! The pieces, leaf first:
//! - [`tags`] normalizes tag text.
//! - [`vault`] walks the note root and scans the metadata line of each note.
//! - [`index`] builds, persists and loads the tag index, and tracks staleness.
//! - [`resolve`] turns a query into concrete note paths.
//! - [`notebook`] ties them together behind a resolved configuration.

pub mod config;
pub mod index;
pub mod notebook;
pub mod resolve;
pub mod tags;
pub mod vault;

pub use notebook::{Notebook, NotebookError};
pub use resolve::{Resolution, ResolutionKind, Resolver, ResolveError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn rustc_version() -> String {
    std::env::var("RUSTC_VERSION").unwrap_or_else(|_| "unknown".into())
}

pub fn doctor_stub() -> String {
    format!(
        "tagmark-core v{} | rustc {} on {} ",
        version(),
        rustc_version(),
        std::env::consts::OS
    )
}
