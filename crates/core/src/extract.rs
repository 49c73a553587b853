//! Regex-based text mining over mapped pages.
//!
//! An [`Extractor`] compiles one or more regular expressions into a single
//! alternation and runs it over the visible text of each page, after
//! `<script>` and `<style>` subtrees have been stripped away. Matches from
//! every page are unioned into one deduplicated set.
//!
//! # Example
//!
//! ```rust
//! use aranea_core::{Extractor, Page, patterns};
//!
//! let html = "<p>contact: test.email@test.com</p>".to_string();
//! let page = Page::from_html("https://example.com/contact", html);
//!
//! let extractor = Extractor::new([patterns::EMAIL]).unwrap();
//! let found = extractor.extract([&page]);
//! assert!(found.contains("test.email@test.com"));
//! ```

use std::collections::BTreeSet;

use regex::Regex;
use scraper::Html;

use crate::Result;
use crate::page::Page;

/// Extracts pattern-matched text from page HTML.
pub struct Extractor {
    pattern: Regex,
}

impl Extractor {
    /// Compiles the given patterns into one alternation.
    ///
    /// # Errors
    ///
    /// Returns [`AraneaError::InvalidPattern`](crate::AraneaError::InvalidPattern)
    /// if any pattern has invalid syntax. The failure happens here, before
    /// any page is scanned; extraction never partially succeeds on a bad
    /// pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternation = patterns
            .into_iter()
            .map(|pattern| pattern.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation)?;

        Ok(Self { pattern })
    }

    /// Pulls every match of the compiled pattern out of the given pages.
    ///
    /// Each page's HTML is cleaned first (see [`clean_html`]); matches
    /// across all pages are collapsed into one set. Barren pages contribute
    /// nothing since their HTML is empty.
    pub fn extract<'a, I>(&self, pages: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a Page>,
    {
        let mut data = BTreeSet::new();

        for page in pages {
            let text = clean_html(&page.html);
            data.extend(self.pattern.find_iter(&text).map(|m| m.as_str().to_string()));
        }

        data
    }
}

/// Collapses HTML to its visible text.
///
/// `<script>` and `<style>` subtrees are removed entirely, then the
/// remaining text nodes are joined with newlines so patterns never match
/// across unrelated fragments of the page.
pub fn clean_html(html: &str) -> String {
    let stripped = strip_noise(html);
    let document = Html::parse_document(&stripped);

    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes `<script>` and `<style>` subtrees from the markup.
fn strip_noise(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |chunk: &[u8]| {
            output.push_str(&String::from_utf8_lossy(chunk));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }
    if rewriter.end().is_err() {
        return html.to_string();
    }

    if output.is_empty() { html.to_string() } else { output }
}
