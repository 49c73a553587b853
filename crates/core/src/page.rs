//! The page entity: one fetched URL plus its parsed outbound links.
//!
//! A [`Page`] maps a URL to the raw HTML behind it and the set of normalized
//! anchor targets found inside. Equality, hashing, and ordering are defined
//! on the URL alone: two pages with the same URL are the same entity no
//! matter what their bodies hold, so deduplicating a map never has to
//! compare HTML contents, and refreshing a page never changes its identity.
//!
//! # Example
//!
//! ```rust
//! use aranea_core::Page;
//!
//! let html = r#"<a href="about.html">About</a>"#.to_string();
//! let page = Page::from_html("https://example.com/index.html", html);
//!
//! assert!(page.children.contains("https://example.com/about.html"));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::fetch::Fetcher;
use crate::normalize::{canonicalize, normalize_link};
use crate::{AraneaError, Result};

/// One fetched URL, its raw HTML, and the links it points at.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Canonical absolute URL; the sole identity of the page.
    pub url: String,

    /// Raw response body. Empty for barren pages.
    #[serde(skip_serializing)]
    pub html: String,

    /// Normalized absolute URLs of every anchor target found on the page.
    /// Empty for barren pages.
    pub children: BTreeSet<String>,
}

impl Page {
    /// Fetches `url` and parses its outbound links.
    ///
    /// The URL is canonicalized (one trailing `/` stripped) before use. A
    /// timeout, non-success status, or transport failure surfaces as an
    /// error carrying the URL; no page is created in that case.
    pub async fn fetch(url: &str, fetcher: &Fetcher) -> Result<Self> {
        let url = canonicalize(url).to_string();
        let parsed = Url::parse(&url).map_err(|e| AraneaError::InvalidUrl(format!("{url}: {e}")))?;
        let html = fetcher.fetch(&parsed).await?;

        Ok(Self::from_html(url, html))
    }

    /// Builds a page from HTML that has already been retrieved.
    ///
    /// Every `a[href]` target is normalized against the page's own URL;
    /// links that cannot be normalized are dropped.
    pub fn from_html(url: impl Into<String>, html: String) -> Self {
        let url = canonicalize(&url.into()).to_string();
        let children = harvest_links(&url, &html);

        Self { url, html, children }
    }

    /// Records a page without fetching it: empty HTML, no children.
    ///
    /// Used by the mapper when the depth budget is exhausted but the page's
    /// existence still belongs in the map. Nothing on the page itself marks
    /// it barren; the caller's depth bookkeeping is the only witness.
    pub fn barren(url: &str) -> Self {
        Self {
            url: canonicalize(url).to_string(),
            html: String::new(),
            children: BTreeSet::new(),
        }
    }

    /// Re-fetches and re-parses the page in place.
    ///
    /// Overwrites `html` and `children`; the URL, and therefore the page's
    /// identity, never changes. Same failure contract as [`Page::fetch`].
    pub async fn refresh(&mut self, fetcher: &Fetcher) -> Result<()> {
        let parsed =
            Url::parse(&self.url).map_err(|e| AraneaError::InvalidUrl(format!("{}: {e}", self.url)))?;
        let html = fetcher.fetch(&parsed).await?;

        self.children = harvest_links(&self.url, &html);
        self.html = html;
        Ok(())
    }
}

/// Collects the normalized targets of every anchor element carrying `href`.
fn harvest_links(url: &str, html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").unwrap();

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| normalize_link(url, href))
        .collect()
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Page {}

impl PartialEq<str> for Page {
    fn eq(&self, other: &str) -> bool {
        self.url == other
    }
}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl Ord for Page {
    fn cmp(&self, other: &Self) -> Ordering {
        self.url.cmp(&other.url)
    }
}

impl PartialOrd for Page {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
