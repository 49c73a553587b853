//! Page fetching over HTTP and from local files.
//!
//! The mapper only needs one capability from the outside world: "give me the
//! body behind this URL, within a bounded time". [`Fetcher`] provides it for
//! `http`/`https` URLs through a single shared reqwest client and for
//! `file://` URLs through a plain filesystem read, which keeps fixture-based
//! test crawls entirely offline.

use std::fs;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{AraneaError, Result};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (compatible; Aranea/1.0; +https://github.com/stormlightlabs/aranea)".to_string(),
        }
    }
}

/// Fetches page bodies on behalf of the mapper.
///
/// A `Fetcher` owns one [`reqwest::Client`] configured from a
/// [`FetchConfig`]; cloning it is cheap and shares the underlying connection
/// pool, so one instance serves every concurrent fetch of a traversal.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Builds a fetcher from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AraneaError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Retrieves the body behind `url`.
    ///
    /// `http`/`https` URLs are fetched with a single GET bounded by the
    /// configured timeout; redirects, TLS, and header handling are the
    /// client's concern. `file` URLs are read from disk. Anything else is
    /// refused with [`AraneaError::UnsupportedScheme`].
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => fetch_file(url),
            scheme => Err(AraneaError::UnsupportedScheme {
                url: url.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }

    async fn fetch_http(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AraneaError::Status { url: url.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|e| self.classify(url, e))
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> AraneaError {
        if error.is_timeout() {
            AraneaError::Timeout { url: url.to_string(), timeout: self.config.timeout }
        } else {
            AraneaError::Transport { url: url.to_string(), source: error }
        }
    }
}

/// Reads the body of a `file://` URL from the local filesystem.
fn fetch_file(url: &Url) -> Result<String> {
    let path = url
        .to_file_path()
        .map_err(|_| AraneaError::InvalidUrl(url.to_string()))?;

    if !path.exists() {
        Err(AraneaError::FileNotFound(path))
    } else {
        fs::read_to_string(&path).map_err(AraneaError::from)
    }
}
