//! Stream page controller: the full post feed with filters and deep-link
//! expansion.

use std::{cell::RefCell, rc::Rc};

use tracing::warn;

use crate::application::article::ArticleLoader;
use crate::application::catalog::{Catalog, CatalogData};
use crate::application::filters::FilterEngine;
use crate::config::{StreamArgs, UiSettings};
use crate::domain::entities::Post;
use crate::domain::filter::{FilterKind, FilterState};
use crate::domain::tags;
use crate::presentation::views::{
    FilterBarView, FilterButtonView, StreamCardView, StreamView, build_tag_badges,
};
use crate::util::datefmt;

const BOOTSTRAP_ERROR: &str =
    "Fehler beim Laden der Blog-Daten. Bitte versuchen Sie es später erneut.";

pub struct StreamController<'a> {
    catalog: &'a Catalog,
    articles: &'a ArticleLoader,
    ui: &'a UiSettings,
    posts_index: &'a str,
}

impl<'a> StreamController<'a> {
    pub fn new(
        catalog: &'a Catalog,
        articles: &'a ArticleLoader,
        ui: &'a UiSettings,
        posts_index: &'a str,
    ) -> Self {
        Self {
            catalog,
            articles,
            ui,
            posts_index,
        }
    }

    /// Bootstrap the stream view: load data, render the full feed, apply
    /// the requested filter toggles through the engine, and expand the
    /// deep-linked post when one is addressed.
    pub async fn view(&self, args: &StreamArgs) -> StreamView {
        let data = self.catalog.data().await;

        // The one user-visible failure path: a broken posts index.
        if data.index_failed(self.posts_index) {
            return StreamView {
                error: Some(BOOTSTRAP_ERROR.to_string()),
                filter_bar: FilterBarView::empty(),
                cards: Vec::new(),
                highlight_seconds: self.ui.highlight_seconds,
                scroll_offset_px: self.ui.scroll_offset_px,
            };
        }

        let posts = sorted_newest_first(&data.posts);

        let latest: Rc<RefCell<Vec<Post>>> = Rc::new(RefCell::new(Vec::new()));
        let state = {
            let sink = Rc::clone(&latest);
            let mut engine = FilterEngine::new(
                &posts,
                Box::new(move |_, filtered| {
                    *sink.borrow_mut() = filtered.into_iter().cloned().collect();
                }),
            );
            for theme in &args.themes {
                engine.toggle(FilterKind::Theme, theme);
            }
            for tag in &args.tags {
                engine.toggle(FilterKind::Hashtag, tag);
            }
            engine.state().clone()
        };
        let visible = latest.borrow().clone();

        let mut cards = Vec::with_capacity(visible.len());
        for post in &visible {
            cards.push(self.card(post, args.post.as_deref()).await);
        }

        if let Some(target) = args.post.as_deref() {
            if !visible.iter().any(|post| post.id == target) {
                warn!(post = target, "deep-link target not in the rendered stream");
            }
        }

        StreamView {
            error: None,
            filter_bar: filter_bar(data, &posts, &state),
            cards,
            highlight_seconds: self.ui.highlight_seconds,
            scroll_offset_px: self.ui.scroll_offset_px,
        }
    }

    async fn card(&self, post: &Post, deep_link: Option<&str>) -> StreamCardView {
        let is_target = deep_link == Some(post.id.as_str());
        let body = if is_target {
            Some(self.articles.full_content(post).await)
        } else {
            None
        };

        StreamCardView {
            id: post.id.clone(),
            theme: post.theme.clone(),
            date_human: datefmt::german_long_opt(post.date),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            tags: build_tag_badges(&post.tags),
            href: post.href().map(ToString::to_string),
            expanded: is_target,
            highlighted: is_target,
            loaded: body.as_ref().is_some_and(|body| body.loaded),
            body_html: body.map(|body| body.html),
        }
    }
}

fn sorted_newest_first(posts: &[Post]) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn filter_bar(data: &CatalogData, posts: &[Post], state: &FilterState) -> FilterBarView {
    let themes = data
        .themes
        .iter()
        .map(|(id, info)| FilterButtonView {
            value: id.clone(),
            label: info.name.clone(),
            active: state.is_theme_active(id),
        })
        .collect();

    let hashtags = tags::unique_normalized(posts.iter().map(|post| post.tags.as_slice()))
        .into_iter()
        .map(|tag| FilterButtonView {
            active: state.is_hashtag_active(&tag),
            label: format!("#{tag}"),
            value: tag,
        })
        .collect();

    FilterBarView {
        all_active: state.all_active(),
        themes,
        hashtags,
    }
}
