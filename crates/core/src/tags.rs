//! Tag normalization.
//!
//! Tags are written to the index exactly as the author typed them and
//! normalized when the index is loaded, so the same rule must be applied to
//! every query tag before it is compared against index keys.

/// Normalize a single tag: lowercase, with every space and underscore removed.
///
/// ```
/// use tagmark_core::tags::format_tag;
///
/// assert_eq!(format_tag(" Rust_Lang "), "rustlang");
/// assert_eq!(format_tag("Side Project"), "sideproject");
/// ```
pub fn format_tag(tag: &str) -> String {
    tag.trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize every tag in `tags`, preserving order.
pub fn format_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter().map(|t| format_tag(t.as_ref())).collect()
}
