//! Data loader for the four JSON indexes.
//!
//! The loaded collections are explicit state owned by this component and
//! handed to the controllers by reference; there are no module-level
//! globals. Each index is fetched at most once per process: the combined
//! result is memoized, including the empty fallbacks a failed fetch leaves
//! behind. Callers never observe an error here, only absence of data.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::SiteSettings;
use crate::domain::entities::{
    Page, PagesIndex, Post, PostsIndex, StaticPagesIndex, ThemeInfo, ThemesIndex,
};
use crate::domain::navigation::{ItemKind, NavigationItem};
use crate::infra::http::FetchClient;

/// The memoized result of one load cycle.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub posts: Vec<Post>,
    pub pages: Vec<Page>,
    pub themes: BTreeMap<String, ThemeInfo>,
    pub static_pages: Vec<Page>,
    /// Index paths whose fetch failed this cycle; their collections above
    /// are the empty fallbacks.
    pub failed_indexes: Vec<String>,
}

impl CatalogData {
    pub fn index_failed(&self, path: &str) -> bool {
        self.failed_indexes.iter().any(|failed| failed == path)
    }

    /// All pages, static ones included; the page side of the resolution pool.
    pub fn all_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().chain(self.static_pages.iter())
    }

    /// The combined posts+pages pool tag resolution runs against. Pages
    /// without a URL cannot be navigated to and stay out of the pool.
    pub fn navigation_items(&self) -> Vec<NavigationItem> {
        let posts = self.posts.iter().map(|post| NavigationItem {
            kind: ItemKind::Post {
                id: post.id.clone(),
            },
            tags: post.tags.clone(),
        });
        let pages = self
            .all_pages()
            .filter(|page| !page.url.is_empty())
            .map(|page| NavigationItem {
                kind: ItemKind::Page {
                    url: page.url.clone(),
                },
                tags: page.tags.clone(),
            });
        posts.chain(pages).collect()
    }
}

pub struct Catalog {
    client: FetchClient,
    site: SiteSettings,
    data: OnceCell<CatalogData>,
}

impl Catalog {
    pub fn new(client: FetchClient, site: SiteSettings) -> Self {
        Self {
            client,
            site,
            data: OnceCell::new(),
        }
    }

    /// The loaded collections, fetching them on first use. The four indexes
    /// are requested as one concurrent group and joined before anything is
    /// rendered.
    pub async fn data(&self) -> &CatalogData {
        self.data.get_or_init(|| self.fetch_all()).await
    }

    async fn fetch_all(&self) -> CatalogData {
        let (posts, pages, themes, static_pages) = tokio::join!(
            self.fetch_index::<PostsIndex>(&self.site.posts_index),
            self.fetch_index::<PagesIndex>(&self.site.pages_index),
            self.fetch_index::<ThemesIndex>(&self.site.themes_index),
            self.fetch_index::<StaticPagesIndex>(&self.site.static_pages_index),
        );

        let mut failed_indexes = Vec::new();
        let mut note_failure = |path: &str, ok: bool| {
            if !ok {
                failed_indexes.push(path.to_string());
            }
        };
        note_failure(&self.site.posts_index, posts.1);
        note_failure(&self.site.pages_index, pages.1);
        note_failure(&self.site.themes_index, themes.1);
        note_failure(&self.site.static_pages_index, static_pages.1);

        let data = CatalogData {
            posts: posts.0.posts,
            pages: pages.0.pages,
            themes: themes.0.themes,
            static_pages: static_pages.0.static_pages,
            failed_indexes,
        };
        debug!(
            posts = data.posts.len(),
            pages = data.pages.len(),
            themes = data.themes.len(),
            static_pages = data.static_pages.len(),
            failed = data.failed_indexes.len(),
            "catalog loaded"
        );
        data
    }

    /// Fetch one index, degrading any failure to the empty default. The
    /// second element reports whether the fetch succeeded.
    async fn fetch_index<T>(&self, path: &str) -> (T, bool)
    where
        T: DeserializeOwned + Default,
    {
        match self.client.get_json::<T>(path).await {
            Ok(index) => (index, true),
            Err(err) => {
                warn!(path, error = %err, "index fetch failed, continuing with empty data");
                (T::default(), false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, tags: &[&str]) -> Post {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Post {id}"),
            "tags": tags,
        }))
        .expect("post")
    }

    fn page(url: &str, tags: &[&str]) -> Page {
        serde_json::from_value(serde_json::json!({
            "title": url,
            "url": url,
            "tags": tags,
        }))
        .expect("page")
    }

    #[test]
    fn navigation_pool_unions_posts_and_all_pages() {
        let data = CatalogData {
            posts: vec![post("1", &["a"])],
            pages: vec![page("/p.html", &["b"])],
            static_pages: vec![page("/impressum.html", &["c"])],
            ..Default::default()
        };
        assert_eq!(data.navigation_items().len(), 3);
    }

    #[test]
    fn pages_without_url_stay_out_of_the_pool() {
        let mut unlinked = page("", &["a"]);
        unlinked.url.clear();
        let data = CatalogData {
            pages: vec![unlinked],
            ..Default::default()
        };
        assert!(data.navigation_items().is_empty());
    }
}
