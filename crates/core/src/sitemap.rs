//! The site map: a deduplicated, ordered collection of pages.
//!
//! One traversal run produces one [`SiteMap`]. Pages are keyed by their
//! canonical URL: inserting a page whose URL is already present leaves the
//! map untouched, so whichever traversal path reaches a URL first wins and
//! the invariant "no two pages share a URL" holds by construction.
//! Iteration order is lexicographic on URL, which keeps output and tests
//! deterministic regardless of fetch ordering.

use std::collections::BTreeMap;
use std::collections::btree_map::Values;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::Result;
use crate::page::Page;

/// A set of pages keyed by URL, produced by one traversal run.
#[derive(Debug, Clone, Default)]
pub struct SiteMap {
    pages: BTreeMap<String, Page>,
}

impl SiteMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self { pages: BTreeMap::new() }
    }

    /// Inserts a page unless its URL is already present.
    ///
    /// Returns whether the page was inserted.
    pub fn insert(&mut self, page: Page) -> bool {
        if self.pages.contains_key(&page.url) {
            return false;
        }
        self.pages.insert(page.url.clone(), page);
        true
    }

    /// Whether a page with the given URL is in the map.
    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Looks up a page by URL.
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.pages.get(url)
    }

    /// Number of pages in the map.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the map holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over the pages in URL order.
    pub fn iter(&self) -> Values<'_, String, Page> {
        self.pages.values()
    }

    /// Iterates over the page URLs in order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Renders the map as a JSON object of `url -> [children]`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(crate::AraneaError::from)
    }
}

impl<'a> IntoIterator for &'a SiteMap {
    type Item = &'a Page;
    type IntoIter = Values<'a, String, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.values()
    }
}

impl IntoIterator for SiteMap {
    type Item = Page;
    type IntoIter = std::collections::btree_map::IntoValues<String, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_values()
    }
}

impl Serialize for SiteMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.pages.len()))?;

        for (url, page) in &self.pages {
            state.serialize_entry(url, &page.children)?;
        }

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_urls_keep_the_first_page() {
        let mut map = SiteMap::new();
        let first = Page::from_html("https://example.com/page", "<p>first</p>".to_string());
        let second = Page::from_html("https://example.com/page", "<p>second</p>".to_string());

        assert!(map.insert(first));
        assert!(!map.insert(second));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("https://example.com/page").unwrap().html, "<p>first</p>");
    }

    #[test]
    fn test_iteration_is_sorted_by_url() {
        let mut map = SiteMap::new();
        map.insert(Page::barren("https://example.com/b"));
        map.insert(Page::barren("https://example.com/a"));

        let urls: Vec<&str> = map.urls().collect();
        assert_eq!(urls, ["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_json_shape_is_url_to_children() {
        let mut map = SiteMap::new();
        let html = r#"<a href="leaf.html">leaf</a>"#.to_string();
        map.insert(Page::from_html("https://example.com/index.html", html));

        let json = map.to_json().unwrap();
        let children = json
            .get("https://example.com/index.html")
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0], "https://example.com/leaf.html");
    }
}
