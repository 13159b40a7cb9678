//! Smart tag navigation: resolve a clicked tag to its concrete target.

use tracing::{debug, warn};

use crate::application::catalog::Catalog;
use crate::config::SiteSettings;
use crate::domain::navigation::{self, ItemKind, NavigationIntent};

/// The boundary value handed to whatever performs the jump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Navigate to this URL.
    Navigate { url: String },
    /// Nothing matched; surface a notice, do not navigate.
    NoResults { tag: String },
}

pub struct TagResolver<'a> {
    catalog: &'a Catalog,
    site: &'a SiteSettings,
}

impl<'a> TagResolver<'a> {
    pub fn new(catalog: &'a Catalog, site: &'a SiteSettings) -> Self {
        Self { catalog, site }
    }

    /// Resolve against the combined posts+pages pool: one hit navigates
    /// directly, several go to the filtered hub, zero produce a notice.
    pub async fn resolve(&self, raw_tag: &str) -> ResolvedTarget {
        let items = self.catalog.data().await.navigation_items();

        match navigation::resolve(raw_tag, &items) {
            NavigationIntent::Direct(ItemKind::Page { url }) => {
                debug!(tag = raw_tag, url, "single page hit, navigating directly");
                ResolvedTarget::Navigate { url }
            }
            NavigationIntent::Direct(ItemKind::Post { id }) => {
                let url = self.site.stream_post_url(&id);
                debug!(tag = raw_tag, url, "single post hit, anchoring into the stream");
                ResolvedTarget::Navigate { url }
            }
            NavigationIntent::HubFilter { tag } => {
                let url = self.site.hub_tag_url(&tag);
                debug!(tag = raw_tag, url, "multiple hits, navigating to the hub");
                ResolvedTarget::Navigate { url }
            }
            NavigationIntent::NoMatch { tag } => {
                warn!(tag, "no entries for tag");
                ResolvedTarget::NoResults { tag }
            }
        }
    }
}
