//! Start page controller: the mixed recent selection of posts and pages.

use time::Date;

use crate::application::catalog::Catalog;
use crate::config::UiSettings;
use crate::presentation::views::{IndexCardView, IndexView, build_tag_badges};
use crate::util::datefmt;

pub struct IndexController<'a> {
    catalog: &'a Catalog,
    ui: &'a UiSettings,
}

impl<'a> IndexController<'a> {
    pub fn new(catalog: &'a Catalog, ui: &'a UiSettings) -> Self {
        Self { catalog, ui }
    }

    /// The N most recent dated posts and N most recent dated pages, merged
    /// and re-sorted so the final card order is chronological across both
    /// sources.
    pub async fn view(&self) -> IndexView {
        let data = self.catalog.data().await;
        let limit = self.ui.recent_per_source;

        let recent_posts = recent(
            data.posts.iter().filter_map(|post| {
                let href = post.href()?.to_string();
                Some(card("post", href, &post.title, post.date, &post.tags, &post.excerpt))
            }),
            limit,
        );
        let recent_pages = recent(
            data.pages.iter().filter(|page| !page.url.is_empty()).map(|page| {
                card(
                    "page",
                    page.url.clone(),
                    &page.title,
                    page.date,
                    &page.tags,
                    &page.excerpt,
                )
            }),
            limit,
        );

        let mut mixed: Vec<(Option<Date>, IndexCardView)> =
            recent_posts.into_iter().chain(recent_pages).collect();
        mixed.sort_by(|a, b| b.0.cmp(&a.0));

        IndexView {
            cards: mixed.into_iter().map(|(_, card)| card).collect(),
        }
    }
}

fn card(
    kind: &'static str,
    href: String,
    title: &str,
    date: Option<Date>,
    tags: &[String],
    excerpt: &str,
) -> (Option<Date>, IndexCardView) {
    (
        date,
        IndexCardView {
            kind,
            href,
            title: title.to_string(),
            date_human: datefmt::german_long_opt(date),
            tags: build_tag_badges(tags),
            excerpt: excerpt.to_string(),
        },
    )
}

/// Keep the `limit` newest dated entries from one source.
fn recent<I>(cards: I, limit: usize) -> Vec<(Option<Date>, IndexCardView)>
where
    I: Iterator<Item = (Option<Date>, IndexCardView)>,
{
    let mut dated: Vec<_> = cards.filter(|(date, _)| date.is_some()).collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(limit);
    dated
}
