//! Records mirrored from the site's pre-generated JSON indexes.

use std::collections::BTreeMap;

use serde::Deserialize;
use time::Date;

use crate::util::datefmt;

/// A blog entry from the posts index. Immutable after load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default, with = "datefmt::iso_date_option")]
    pub date: Option<Date>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

impl Post {
    /// The link target for the card, preferring the generated file path.
    pub fn href(&self) -> Option<&str> {
        self.file.as_deref().or(self.url.as_deref())
    }
}

/// A static, non-chronological content page carrying its own tags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default, with = "datefmt::iso_date_option")]
    pub date: Option<Date>,
}

/// Descriptive metadata for a theme grouping. No behavior attached.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Wire envelope of `api/posts.json`; a missing `posts` key is an empty index.
#[derive(Debug, Default, Deserialize)]
pub struct PostsIndex {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Wire envelope of `api/pages.json`.
#[derive(Debug, Default, Deserialize)]
pub struct PagesIndex {
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// Wire envelope of `api/themes.json`, keyed by theme identifier.
#[derive(Debug, Default, Deserialize)]
pub struct ThemesIndex {
    #[serde(default)]
    pub themes: BTreeMap<String, ThemeInfo>,
}

/// Wire envelope of the static-pages index.
#[derive(Debug, Default, Deserialize)]
pub struct StaticPagesIndex {
    #[serde(default, rename = "staticPages")]
    pub static_pages: Vec<Page>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn post_deserializes_with_sparse_fields() {
        let post: Post = serde_json::from_str(r#"{"id":"42","title":"Treibgut"}"#).expect("post");
        assert_eq!(post.id, "42");
        assert_eq!(post.date, None);
        assert!(post.tags.is_empty());
        assert_eq!(post.theme, None);
        assert_eq!(post.href(), None);
    }

    #[test]
    fn post_href_prefers_file_over_url() {
        let post: Post = serde_json::from_str(
            r#"{"id":"1","title":"x","file":"posts/1.html","url":"/fallback.html"}"#,
        )
        .expect("post");
        assert_eq!(post.href(), Some("posts/1.html"));
    }

    #[test]
    fn malformed_date_degrades_to_none() {
        let post: Post =
            serde_json::from_str(r#"{"id":"1","title":"x","date":"gestern"}"#).expect("post");
        assert_eq!(post.date, None);

        let post: Post =
            serde_json::from_str(r#"{"id":"1","title":"x","date":"2025-11-27"}"#).expect("post");
        assert_eq!(post.date, Some(date!(2025 - 11 - 27)));
    }

    #[test]
    fn missing_top_level_key_is_an_empty_index() {
        let index: PostsIndex = serde_json::from_str("{}").expect("index");
        assert!(index.posts.is_empty());

        let index: ThemesIndex = serde_json::from_str("{}").expect("index");
        assert!(index.themes.is_empty());

        let index: StaticPagesIndex = serde_json::from_str("{}").expect("index");
        assert!(index.static_pages.is_empty());
    }

    #[test]
    fn static_pages_key_is_camel_case() {
        let index: StaticPagesIndex =
            serde_json::from_str(r#"{"staticPages":[{"title":"Impressum","url":"/impressum.html"}]}"#)
                .expect("index");
        assert_eq!(index.static_pages.len(), 1);
        assert_eq!(index.static_pages[0].url, "/impressum.html");
    }
}
