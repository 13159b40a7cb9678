//! Tag normalization and lookup helpers.
//!
//! The indexes are hand-maintained, so the same tag shows up as `#Politik`,
//! `politik`, or ` Politik `. Every comparison in the crate goes through
//! [`normalize`] so those spellings collapse to one value.

use std::collections::BTreeSet;

/// Canonical form of a tag: leading `#` stripped, trimmed, lowercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().trim_start_matches('#').trim().to_lowercase()
}

/// True when `tags` contains `needle` under normalization. `needle` must
/// already be normalized.
pub fn contains(tags: &[String], needle: &str) -> bool {
    tags.iter().any(|tag| normalize(tag) == needle)
}

/// The sorted set of unique normalized tags across all tag lists, the input
/// for the hub's tag cloud.
pub fn unique_normalized<'a, I>(tag_lists: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    tag_lists
        .into_iter()
        .flatten()
        .map(|tag| normalize(tag))
        .filter(|tag| !tag.is_empty())
        .collect()
}
