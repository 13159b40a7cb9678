//! uferlos: reader-side companion for a static personal blog.
//!
//! Fetches the pre-generated JSON indexes the site publishes, keeps the
//! theme/hashtag filter state, resolves tag deep-links to navigation
//! targets, and renders the index / stream / hub views as HTML.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
