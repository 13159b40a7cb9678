//! Tag resolution: the three-way branch behind "smart" tag navigation.
//!
//! Resolution is a pure function from a clicked tag and the combined item
//! list to a [`NavigationIntent`]; turning an intent into a concrete URL and
//! performing the jump stays at the application boundary.

use crate::domain::tags;

/// One entry in the combined posts+pages pool a tag is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub kind: ItemKind,
    pub tags: Vec<String>,
}

/// What a resolved item is addressed by: posts anchor into the stream by id,
/// pages have their own static URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Post { id: String },
    Page { url: String },
}

/// Outcome of resolving a clicked tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Exactly one hit: jump straight to it.
    Direct(ItemKind),
    /// Several hits: browse them on the hub, filtered by the tag.
    HubFilter { tag: String },
    /// Nothing carries this tag; no navigation happens.
    NoMatch { tag: String },
}

/// Count the items tagged with `raw_tag` (compared under normalization) and
/// pick the navigation branch: 1 hit → direct, >1 → hub filter, 0 → none.
pub fn resolve(raw_tag: &str, items: &[NavigationItem]) -> NavigationIntent {
    let tag = tags::normalize(raw_tag);

    let mut hits = items
        .iter()
        .filter(|item| tags::contains(&item.tags, &tag));

    match (hits.next(), hits.next()) {
        (Some(only), None) => NavigationIntent::Direct(only.kind.clone()),
        (Some(_), Some(_)) => NavigationIntent::HubFilter { tag },
        (None, _) => NavigationIntent::NoMatch { tag },
    }
}
