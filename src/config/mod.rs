//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueHint};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "uferlos";
const DEFAULT_POSTS_INDEX: &str = "api/posts.json";
const DEFAULT_PAGES_INDEX: &str = "api/pages.json";
const DEFAULT_THEMES_INDEX: &str = "api/themes.json";
const DEFAULT_STATIC_PAGES_INDEX: &str = "api/static.json";
const DEFAULT_STREAM_PAGE: &str = "strom.html";
const DEFAULT_HUB_PAGE: &str = "themen.html";
const DEFAULT_RECENT_PER_SOURCE: usize = 2;
const DEFAULT_HIGHLIGHT_SECONDS: u64 = 3;
const DEFAULT_SCROLL_OFFSET_PX: i32 = -20;
const DEFAULT_PREFS_FILE: &str = ".uferlos-scheme";
const DEFAULT_BRAND_TITLE: &str = "borderless deviant";
const DEFAULT_BRAND_TAGLINE: &str = "Struktur im Chaos";

/// Command-line arguments for the uferlos binary.
#[derive(Debug, Parser)]
#[command(name = "uferlos", version, about = "Static-blog reader companion")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "UFERLOS_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Override the site base URL the indexes are fetched from.
    #[arg(long = "site-url", env = "UFERLOS_SITE_URL", value_name = "URL")]
    pub site_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON instead of the compact format.
    #[arg(long = "log-json", action = clap::ArgAction::SetTrue)]
    pub log_json: bool,

    /// Write rendered HTML to this path instead of stdout.
    #[arg(long = "out", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render the start page with the mixed recent cards.
    Index,
    /// Render the stream view with filters and deep-link expansion.
    Stream(StreamArgs),
    /// Render the theme hub: tag cloud, tag results, or grouped categories.
    Hub(HubArgs),
    /// Resolve a clicked tag to its navigation target.
    Resolve(ResolveArgs),
    /// Show or toggle the stored color scheme.
    Scheme(SchemeArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct StreamArgs {
    /// Toggle a theme filter; may be given multiple times.
    #[arg(long = "theme", value_name = "THEME")]
    pub themes: Vec<String>,

    /// Toggle a hashtag filter; may be given multiple times.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Deep-link: expand and highlight the post with this id.
    #[arg(long = "post", value_name = "ID")]
    pub post: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct HubArgs {
    /// Show the results list for this tag instead of the category grid.
    #[arg(long = "tag", value_name = "TAG")]
    pub tag: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ResolveArgs {
    /// The clicked tag, with or without a leading `#`.
    pub tag: String,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SchemeArgs {
    /// Flip between light and dark and persist the choice.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub toggle: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Read(#[from] config::ConfigError),
    #[error("site base URL is required (set site.base_url, UFERLOS_SITE_URL, or --site-url)")]
    MissingSiteUrl,
    #[error("invalid site base URL `{value}`: {source}")]
    InvalidSiteUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("invalid log level `{0}`")]
    InvalidLogLevel(String),
    #[error("invalid color scheme `{0}` (expected `light` or `dark`)")]
    InvalidScheme(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSettings {
    #[serde(default)]
    site: RawSite,
    #[serde(default)]
    ui: RawUi,
    #[serde(default)]
    prefs: RawPrefs,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
struct RawSite {
    base_url: Option<String>,
    posts_index: Option<String>,
    pages_index: Option<String>,
    themes_index: Option<String>,
    static_pages_index: Option<String>,
    stream_page: Option<String>,
    hub_page: Option<String>,
    brand_title: Option<String>,
    brand_tagline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawUi {
    recent_per_source: Option<usize>,
    highlight_seconds: Option<u64>,
    scroll_offset_px: Option<i32>,
    default_scheme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPrefs {
    scheme_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLogging {
    level: Option<String>,
    format: Option<String>,
}

impl RawSettings {
    fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(site_url) = &cli.site_url {
            self.site.base_url = Some(site_url.clone());
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = Some(level.clone());
        }
        if cli.log_json {
            self.logging.format = Some("json".to_string());
        }
    }
}

/// Stored color scheme; `Light` doubles as the system fallback default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

impl FromStr for ColorScheme {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(ConfigError::InvalidScheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

/// Where the site lives and which paths make up its read surface.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: Url,
    pub posts_index: String,
    pub pages_index: String,
    pub themes_index: String,
    pub static_pages_index: String,
    pub stream_page: String,
    pub hub_page: String,
    pub brand_title: String,
    pub brand_tagline: String,
}

impl SiteSettings {
    /// `strom.html?post=<id>`: the stream view anchored at a post.
    pub fn stream_post_url(&self, post_id: &str) -> String {
        format!("{}?{}", self.stream_page, query_pair("post", post_id))
    }

    /// `themen.html?tag=<tag>`: the hub view filtered by a tag.
    pub fn hub_tag_url(&self, tag: &str) -> String {
        format!("{}?{}", self.hub_page, query_pair("tag", tag))
    }
}

/// Form-encoded `key=value`; ids and tags come from hand-maintained indexes
/// and may carry spaces or `&`.
fn query_pair(key: &str, value: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

#[derive(Debug, Clone)]
pub struct UiSettings {
    pub recent_per_source: usize,
    pub highlight_seconds: u64,
    pub scroll_offset_px: i32,
    pub default_scheme: ColorScheme,
}

#[derive(Debug, Clone)]
pub struct PrefsSettings {
    pub scheme_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub site: SiteSettings,
    pub ui: UiSettings,
    pub prefs: PrefsSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let base_url_raw = raw.site.base_url.ok_or(ConfigError::MissingSiteUrl)?;
        let base_url =
            Url::parse(&base_url_raw).map_err(|source| ConfigError::InvalidSiteUrl {
                value: base_url_raw,
                source,
            })?;

        let level = match raw.logging.level {
            Some(value) => LevelFilter::from_str(&value)
                .map_err(|_| ConfigError::InvalidLogLevel(value.clone()))?,
            None => LevelFilter::INFO,
        };
        let format = match raw.logging.format.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        let default_scheme = match raw.ui.default_scheme {
            Some(value) => value.parse()?,
            None => ColorScheme::Light,
        };

        Ok(Self {
            site: SiteSettings {
                base_url,
                posts_index: raw
                    .site
                    .posts_index
                    .unwrap_or_else(|| DEFAULT_POSTS_INDEX.to_string()),
                pages_index: raw
                    .site
                    .pages_index
                    .unwrap_or_else(|| DEFAULT_PAGES_INDEX.to_string()),
                themes_index: raw
                    .site
                    .themes_index
                    .unwrap_or_else(|| DEFAULT_THEMES_INDEX.to_string()),
                static_pages_index: raw
                    .site
                    .static_pages_index
                    .unwrap_or_else(|| DEFAULT_STATIC_PAGES_INDEX.to_string()),
                stream_page: raw
                    .site
                    .stream_page
                    .unwrap_or_else(|| DEFAULT_STREAM_PAGE.to_string()),
                hub_page: raw
                    .site
                    .hub_page
                    .unwrap_or_else(|| DEFAULT_HUB_PAGE.to_string()),
                brand_title: raw
                    .site
                    .brand_title
                    .unwrap_or_else(|| DEFAULT_BRAND_TITLE.to_string()),
                brand_tagline: raw
                    .site
                    .brand_tagline
                    .unwrap_or_else(|| DEFAULT_BRAND_TAGLINE.to_string()),
            },
            ui: UiSettings {
                recent_per_source: raw
                    .ui
                    .recent_per_source
                    .unwrap_or(DEFAULT_RECENT_PER_SOURCE),
                highlight_seconds: raw
                    .ui
                    .highlight_seconds
                    .unwrap_or(DEFAULT_HIGHLIGHT_SECONDS),
                scroll_offset_px: raw.ui.scroll_offset_px.unwrap_or(DEFAULT_SCROLL_OFFSET_PX),
                default_scheme,
            },
            prefs: PrefsSettings {
                scheme_file: raw
                    .prefs
                    .scheme_file
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE)),
            },
            logging: LoggingSettings { level, format },
        })
    }
}

fn load_raw(config_file: Option<&PathBuf>) -> Result<RawSettings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    let config = builder
        .add_source(Environment::with_prefix("UFERLOS").separator("__"))
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Parse the CLI and assemble validated settings with layered precedence.
pub fn load_with_cli() -> Result<(CliArgs, Settings), ConfigError> {
    let cli = CliArgs::parse();
    let mut raw = load_raw(cli.config_file.as_ref())?;
    raw.apply_cli(&cli);
    let settings = Settings::from_raw(raw)?;
    Ok((cli, settings))
}
