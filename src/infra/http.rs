//! Thin fetch client over the static site: typed JSON for the indexes,
//! plain text for the generated article pages.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::infra::error::InfraError;

#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    base: Url,
}

impl FetchClient {
    /// Build a client rooted at the site base URL. Relative paths passed to
    /// the getters are joined against it; absolute URLs pass through. A
    /// subpath in the base (a blog hosted under `/blog/`) is kept, so the
    /// base only gains a trailing slash when it lacks one.
    pub fn new(site: &Url) -> Result<Self, InfraError> {
        let mut base = site.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("uferlos/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url(&self, path: &str) -> Result<Url, InfraError> {
        self.base.join(path).map_err(InfraError::Url)
    }

    /// GET a JSON resource and decode it into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, InfraError> {
        let url = self.url(path)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InfraError::status(status.as_u16(), url.as_str()));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| InfraError::decode(url.as_str(), err.to_string()))
    }

    /// GET a resource as text (the generated article HTML pages).
    pub async fn get_text(&self, path: &str) -> Result<String, InfraError> {
        let url = self.url(path)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InfraError::status(status.as_u16(), url.as_str()));
        }
        Ok(response.text().await?)
    }
}
