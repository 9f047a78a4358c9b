//! Path fingerprinting for index keys.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

/// 64-bit fingerprint of a note's root-relative path.
///
/// Fingerprints are recomputed every time the index is loaded and never
/// written to disk. Two distinct paths may share a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(pub u64);

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Compute the fingerprint of a note path such as `work/meeting`.
/// Uses DefaultHasher for speed (non-cryptographic, fixed keys).
pub fn path_hash(path: &str) -> ContentHash {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    ContentHash(hasher.finish())
}
