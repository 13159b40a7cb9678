//! Filter state for the stream view: OR-combined theme and hashtag sets.

use std::collections::BTreeSet;

use crate::domain::entities::Post;
use crate::domain::tags;

/// What a filter control toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Theme,
    Hashtag,
    All,
}

/// Active filter sets. The "all" mode is derived, never stored: it is active
/// exactly when both sets are empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    themes: BTreeSet<String>,
    hashtags: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a filter value. `FilterKind::All` clears both sets; hashtag
    /// values are normalized before membership is flipped, so toggling
    /// `#Politik` and `politik` touches the same entry.
    pub fn toggle(&mut self, kind: FilterKind, value: &str) {
        match kind {
            FilterKind::All => self.clear(),
            FilterKind::Theme => flip(&mut self.themes, value.to_string()),
            FilterKind::Hashtag => flip(&mut self.hashtags, tags::normalize(value)),
        }
    }

    /// Drop every active filter, returning to the unfiltered view.
    pub fn clear(&mut self) {
        self.themes.clear();
        self.hashtags.clear();
    }

    /// Derived "Alle Posts" condition.
    pub fn all_active(&self) -> bool {
        self.themes.is_empty() && self.hashtags.is_empty()
    }

    pub fn is_theme_active(&self, theme: &str) -> bool {
        self.themes.contains(theme)
    }

    pub fn is_hashtag_active(&self, tag: &str) -> bool {
        self.hashtags.contains(&tags::normalize(tag))
    }

    /// Whether a single post passes the current filters: the theme clause
    /// and the hashtag clause must both hold, each being vacuously true when
    /// its set is empty.
    pub fn matches(&self, post: &Post) -> bool {
        let matches_theme = self.themes.is_empty()
            || post
                .theme
                .as_deref()
                .is_some_and(|theme| self.themes.contains(theme));
        let matches_hashtag = self.hashtags.is_empty()
            || post
                .tags
                .iter()
                .any(|tag| self.hashtags.contains(&tags::normalize(tag)));
        matches_theme && matches_hashtag
    }

    /// Pure filter application; with both sets empty this is the identity.
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        if self.all_active() {
            return posts.iter().collect();
        }
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

fn flip(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, theme: Option<&str>, tags: &[&str]) -> Post {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Post {id}"),
            "theme": theme,
            "tags": tags,
        }))
        .expect("post")
    }

    #[test]
    fn empty_state_is_identity() {
        let posts = vec![post("1", Some("alltag"), &["a"]), post("2", None, &[])];
        let state = FilterState::new();
        assert!(state.all_active());
        assert_eq!(state.apply(&posts).len(), posts.len());
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut state = FilterState::new();
        state.toggle(FilterKind::Theme, "alltag");
        assert!(!state.all_active());
        state.toggle(FilterKind::Theme, "alltag");
        assert!(state.all_active());
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn all_clears_both_sets() {
        let mut state = FilterState::new();
        state.toggle(FilterKind::Theme, "alltag");
        state.toggle(FilterKind::Hashtag, "politik");
        state.toggle(FilterKind::All, "all");
        assert!(state.all_active());
    }

    #[test]
    fn theme_and_hashtag_clauses_are_anded() {
        let posts = vec![
            post("1", Some("alltag"), &["politik"]),
            post("2", Some("alltag"), &["reise"]),
            post("3", Some("technik"), &["politik"]),
        ];
        let mut state = FilterState::new();
        state.toggle(FilterKind::Theme, "alltag");
        state.toggle(FilterKind::Hashtag, "politik");

        let ids: Vec<&str> = state.apply(&posts).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn multiple_values_within_a_set_are_ored() {
        let posts = vec![
            post("1", Some("alltag"), &[]),
            post("2", Some("technik"), &[]),
            post("3", Some("reise"), &[]),
        ];
        let mut state = FilterState::new();
        state.toggle(FilterKind::Theme, "alltag");
        state.toggle(FilterKind::Theme, "technik");

        let ids: Vec<&str> = state.apply(&posts).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn post_without_theme_or_tags_fails_nonempty_sets() {
        let bare = post("1", None, &[]);
        let mut state = FilterState::new();
        state.toggle(FilterKind::Theme, "alltag");
        assert!(!state.matches(&bare));

        let mut state = FilterState::new();
        state.toggle(FilterKind::Hashtag, "politik");
        assert!(!state.matches(&bare));
    }

    #[test]
    fn hashtag_toggle_normalizes_its_value() {
        let posts = vec![post("1", None, &["#Politik"])];
        let mut state = FilterState::new();
        state.toggle(FilterKind::Hashtag, "#Politik");
        assert!(state.is_hashtag_active("politik"));
        assert_eq!(state.apply(&posts).len(), 1);

        state.toggle(FilterKind::Hashtag, "politik");
        assert!(state.all_active());
    }
}
