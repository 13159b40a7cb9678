//! View structs and templates for the three rendered pages.
//!
//! Views are plain string-bearing types; everything date- or tag-shaped is
//! formatted before it reaches a template.

use askama::{Error as AskamaError, Template};
use thiserror::Error;
use time::OffsetDateTime;

use crate::config::{ColorScheme, SiteSettings};
use crate::domain::tags;

#[derive(Debug, Error)]
#[error("{origin}: {public_message}")]
pub struct TemplateRenderError {
    pub(crate) origin: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(origin: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            origin,
            public_message,
            error,
        }
    }
}

pub fn render_template<T: Template>(
    origin: &'static str,
    template: &T,
) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new(origin, "Template rendering failed", err))
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub tagline: String,
}

#[derive(Clone)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Shared page chrome plus the page-specific content, the shape every page
/// template renders.
#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: Vec<NavLinkView>,
    pub footer_year: i32,
    pub scheme: &'static str,
    pub content: T,
}

impl<T> LayoutContext<T> {
    /// Assemble the chrome around a content view. `active_href` marks the
    /// matching nav link, mirroring the path check the nav component did.
    pub fn new(site: &SiteSettings, scheme: ColorScheme, active_href: &str, content: T) -> Self {
        let links = [
            ("Home", "index.html"),
            ("Der Strom", site.stream_page.as_str()),
            ("Themen", site.hub_page.as_str()),
            ("Über mich", "about.html"),
        ];
        Self {
            brand: BrandView {
                title: site.brand_title.clone(),
                tagline: site.brand_tagline.clone(),
            },
            navigation: links
                .into_iter()
                .map(|(label, href)| NavLinkView {
                    label: label.to_string(),
                    href: href.to_string(),
                    active: href == active_href,
                })
                .collect(),
            footer_year: OffsetDateTime::now_utc().year(),
            scheme: scheme.as_str(),
            content,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TagBadgeView {
    pub value: String,
}

/// Normalized badge per tag, in index order.
pub fn build_tag_badges(raw_tags: &[String]) -> Vec<TagBadgeView> {
    raw_tags
        .iter()
        .map(|tag| TagBadgeView {
            value: tags::normalize(tag),
        })
        .filter(|badge| !badge.value.is_empty())
        .collect()
}

#[derive(Clone)]
pub struct FilterButtonView {
    pub value: String,
    pub label: String,
    pub active: bool,
}

#[derive(Clone)]
pub struct FilterBarView {
    pub all_active: bool,
    pub themes: Vec<FilterButtonView>,
    pub hashtags: Vec<FilterButtonView>,
}

impl FilterBarView {
    pub fn empty() -> Self {
        Self {
            all_active: true,
            themes: Vec::new(),
            hashtags: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct StreamCardView {
    pub id: String,
    pub theme: Option<String>,
    pub date_human: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<TagBadgeView>,
    pub href: Option<String>,
    pub expanded: bool,
    pub highlighted: bool,
    pub loaded: bool,
    pub body_html: Option<String>,
}

#[derive(Clone)]
pub struct StreamView {
    pub error: Option<String>,
    pub filter_bar: FilterBarView,
    pub cards: Vec<StreamCardView>,
    pub highlight_seconds: u64,
    pub scroll_offset_px: i32,
}

#[derive(Template)]
#[template(path = "stream.html")]
pub struct StreamTemplate {
    pub view: LayoutContext<StreamView>,
}

#[derive(Clone)]
pub struct IndexCardView {
    pub kind: &'static str,
    pub href: String,
    pub title: String,
    pub date_human: String,
    pub tags: Vec<TagBadgeView>,
    pub excerpt: String,
}

#[derive(Clone)]
pub struct IndexView {
    pub cards: Vec<IndexCardView>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<IndexView>,
}

#[derive(Clone)]
pub struct HubResultEntryView {
    pub href: String,
    pub icon: &'static str,
    pub title: String,
    pub date_human: String,
    pub excerpt: String,
}

#[derive(Clone)]
pub struct HubResultsView {
    pub tag: String,
    pub entries: Vec<HubResultEntryView>,
}

#[derive(Clone)]
pub struct GroupEntryView {
    pub href: String,
    pub title: String,
    pub date_human: String,
}

#[derive(Clone)]
pub struct ThemeGroupView {
    pub key: String,
    pub name: String,
    pub description: String,
    pub entries: Vec<GroupEntryView>,
}

#[derive(Clone)]
pub struct HubView {
    pub cloud: Vec<TagBadgeView>,
    pub hub_page: String,
    pub results: Option<HubResultsView>,
    pub groups: Vec<ThemeGroupView>,
}

#[derive(Template)]
#[template(path = "hub.html")]
pub struct HubTemplate {
    pub view: LayoutContext<HubView>,
}
