//! Hub page controller: tag cloud plus either the tag result list or the
//! grouped category view.

use time::Date;

use crate::application::catalog::Catalog;
use crate::config::{HubArgs, SiteSettings};
use crate::domain::tags;
use crate::presentation::views::{
    GroupEntryView, HubResultEntryView, HubResultsView, HubView, TagBadgeView, ThemeGroupView,
};
use crate::util::datefmt;

/// Bucket for items whose theme is missing or unknown.
const FALLBACK_THEME_KEY: &str = "sonstiges";
const FALLBACK_THEME_NAME: &str = "Sonstiges";

const POST_ICON: &str = "📝";
const PAGE_ICON: &str = "📄";

/// One entry of the combined posts+pages content pool, flattened to what
/// the hub renders.
struct HubItem {
    title: String,
    href: String,
    icon: &'static str,
    excerpt: String,
    tags: Vec<String>,
    theme: Option<String>,
    date: Option<Date>,
}

pub struct HubController<'a> {
    catalog: &'a Catalog,
    site: &'a SiteSettings,
}

impl<'a> HubController<'a> {
    pub fn new(catalog: &'a Catalog, site: &'a SiteSettings) -> Self {
        Self { catalog, site }
    }

    pub async fn view(&self, args: &HubArgs) -> HubView {
        let data = self.catalog.data().await;
        let items = self.collect_items().await;

        // The cloud is always rendered so a dead-end filter still offers a
        // way to keep browsing.
        let cloud: Vec<TagBadgeView> =
            tags::unique_normalized(items.iter().map(|item| item.tags.as_slice()))
                .into_iter()
                .map(|value| TagBadgeView { value })
                .collect();

        let (results, groups) = match &args.tag {
            Some(raw_tag) => {
                let tag = tags::normalize(raw_tag);
                let entries = items
                    .iter()
                    .filter(|item| tags::contains(&item.tags, &tag))
                    .map(|item| HubResultEntryView {
                        href: item.href.clone(),
                        icon: item.icon,
                        title: item.title.clone(),
                        date_human: datefmt::german_long_opt(item.date),
                        excerpt: item.excerpt.clone(),
                    })
                    .collect();
                (Some(HubResultsView { tag, entries }), Vec::new())
            }
            None => (None, self.grouped(&data.themes, items)),
        };

        HubView {
            cloud,
            hub_page: self.site.hub_page.clone(),
            results,
            groups,
        }
    }

    /// Grouped category view: items bucketed per theme, newest first within
    /// each bucket, unknown themes gathered under the fallback bucket.
    fn grouped(
        &self,
        themes: &std::collections::BTreeMap<String, crate::domain::entities::ThemeInfo>,
        mut items: Vec<HubItem>,
    ) -> Vec<ThemeGroupView> {
        items.sort_by(|a, b| b.date.cmp(&a.date));

        let mut groups: Vec<ThemeGroupView> = themes
            .iter()
            .map(|(key, info)| ThemeGroupView {
                key: key.clone(),
                name: info.name.clone(),
                description: info.description.clone(),
                entries: Vec::new(),
            })
            .collect();
        groups.push(ThemeGroupView {
            key: FALLBACK_THEME_KEY.to_string(),
            name: FALLBACK_THEME_NAME.to_string(),
            description: String::new(),
            entries: Vec::new(),
        });

        for item in items {
            let key = item
                .theme
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| FALLBACK_THEME_KEY.to_string());
            let entry = GroupEntryView {
                href: item.href,
                title: item.title,
                date_human: datefmt::german_long_opt(item.date),
            };
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.entries.push(entry),
                None => groups
                    .iter_mut()
                    .rfind(|group| group.key == FALLBACK_THEME_KEY)
                    .expect("fallback bucket exists")
                    .entries
                    .push(entry),
            }
        }

        groups.retain(|group| !group.entries.is_empty());
        groups
    }

    async fn collect_items(&self) -> Vec<HubItem> {
        let data = self.catalog.data().await;

        let posts = data.posts.iter().map(|post| HubItem {
            title: post.title.clone(),
            href: self.site.stream_post_url(&post.id),
            icon: POST_ICON,
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            theme: post.theme.clone(),
            date: post.date,
        });
        let pages = data
            .all_pages()
            .filter(|page| !page.url.is_empty())
            .map(|page| HubItem {
                title: page.title.clone(),
                href: page.url.clone(),
                icon: PAGE_ICON,
                excerpt: page.excerpt.clone(),
                tags: page.tags.clone(),
                theme: page.theme.clone(),
                date: page.date,
            });

        posts.chain(pages).collect()
    }
}
