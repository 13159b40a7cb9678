//! Application services: controllers and the data-access components they share.

pub mod article;
pub mod catalog;
pub mod error;
pub mod filters;
pub mod hub;
pub mod index;
pub mod resolve;
pub mod scheme;
pub mod stream;
