//! Full-article loading for expanded post cards.
//!
//! The generated post pages carry their article body inside an element
//! marked with the `post-generated` class. The loader fetches the page,
//! cuts that region out, and caches it per post id so a card expanded twice
//! never refetches. Failures degrade to an inline error fragment.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use lol_html::{RewriteStrSettings, element, html_content::ContentType, rewrite_str};
use thiserror::Error;
use tracing::warn;

use crate::domain::entities::Post;
use crate::infra::http::FetchClient;

const CONTENT_SELECTOR: &str = ".post-generated";
const REGION_START: &str = "<!--uferlos:article-start-->";
const REGION_END: &str = "<!--uferlos:article-end-->";

const MISSING_ARTICLE: &str = r#"<p class="error">Vollständiger Artikel nicht gefunden.</p>"#;
const MISSING_REGION: &str =
    r#"<p class="error">Artikelinhalt im HTML nicht gefunden (Missing &lt;article&gt; tag).</p>"#;
const LOAD_FAILED: &str = r#"<p class="error">Fehler beim Laden des Artikels.</p>"#;

#[derive(Debug, Error)]
enum ExtractError {
    #[error("document could not be rewritten: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),
    #[error("no element with the `post-generated` marker class")]
    RegionMissing,
}

/// The body shown in a card's full-content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBody {
    pub html: String,
    /// Whether this body is real article content (and cached as such), as
    /// opposed to an inline error fragment.
    pub loaded: bool,
}

impl ArticleBody {
    fn loaded(html: String) -> Self {
        Self { html, loaded: true }
    }

    fn fallback(html: &str) -> Self {
        Self {
            html: html.to_string(),
            loaded: false,
        }
    }
}

pub struct ArticleLoader {
    client: FetchClient,
    cache: Mutex<HashMap<String, String>>,
}

impl ArticleLoader {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load the full body for a post, serving repeated expansions from the
    /// cache. Only successfully extracted content is cached; error fragments
    /// are returned but never stored, matching the loaded-flag behavior of
    /// the cards.
    pub async fn full_content(&self, post: &Post) -> ArticleBody {
        let Some(href) = post.href() else {
            warn!(post = %post.id, "post has no article URL");
            return ArticleBody::fallback(MISSING_ARTICLE);
        };

        if let Some(cached) = self.cached(&post.id) {
            return ArticleBody::loaded(cached);
        }

        let document = match self.client.get_text(href).await {
            Ok(document) => document,
            Err(err) => {
                warn!(post = %post.id, url = href, error = %err, "article fetch failed");
                return ArticleBody::fallback(LOAD_FAILED);
            }
        };

        match extract_marked_region(&document) {
            Ok(html) => {
                self.store(&post.id, &html);
                ArticleBody::loaded(html)
            }
            Err(err) => {
                warn!(post = %post.id, url = href, error = %err, "article extraction failed");
                ArticleBody::fallback(MISSING_REGION)
            }
        }
    }

    fn cached(&self, post_id: &str) -> Option<String> {
        self.cache
            .lock()
            .expect("article cache lock poisoned")
            .get(post_id)
            .cloned()
    }

    fn store(&self, post_id: &str, html: &str) {
        self.cache
            .lock()
            .expect("article cache lock poisoned")
            .insert(post_id.to_string(), html.to_string());
    }
}

/// Cut the inner HTML of the first `post-generated` element out of a full
/// document. The rewriter brackets the element content with comment markers
/// and the region between the first marker pair is taken verbatim.
fn extract_marked_region(document: &str) -> Result<String, ExtractError> {
    let rewritten = rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers: vec![element!(CONTENT_SELECTOR, |el| {
                el.prepend(REGION_START, ContentType::Html);
                el.append(REGION_END, ContentType::Html);
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    )?;

    let start = rewritten
        .find(REGION_START)
        .ok_or(ExtractError::RegionMissing)?
        + REGION_START.len();
    let end = rewritten[start..]
        .find(REGION_END)
        .ok_or(ExtractError::RegionMissing)?
        + start;

    Ok(rewritten[start..end].trim().to_string())
}
