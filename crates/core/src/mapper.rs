//! Depth-budgeted, domain-scoped site traversal.
//!
//! [`SiteMapper`] walks a site breadth-first from a root URL and produces a
//! [`SiteMap`]. Each queue entry carries its own remaining depth budget; a
//! page dequeued with a spent budget is recorded as a barren placeholder
//! instead of being fetched. When domain scoping is on, links that leave the
//! root's host stay visible in their parent's `children` but are never
//! fetched themselves.
//!
//! Up to `concurrency` fetches run at once. One coordinating loop owns the
//! pending queue, the claimed-URL set, and the growing map, so the
//! "have we seen this URL" check and the enqueue of new children happen as
//! one step: a URL is claimed the moment it is queued, and at most one
//! fetch for it is ever in flight. Fetch failures are collected in the
//! report and never abort the run; cancellation stops dispatching, lets
//! in-flight fetches drain, and returns whatever was mapped so far.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::fetch::{FetchConfig, Fetcher};
use crate::normalize::canonicalize;
use crate::page::Page;
use crate::sitemap::SiteMap;
use crate::{AraneaError, Result};

/// Configuration for a traversal run.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// Greatest link depth to fetch; `None` walks until the site is
    /// exhausted (default).
    pub max_depth: Option<usize>,

    /// Whether to follow links that leave the root's host (default: false).
    pub follow_external: bool,

    /// Upper bound on concurrent in-flight fetches (default: 8).
    pub concurrency: usize,

    /// Fetch settings shared by every request of the run.
    pub fetch: FetchConfig,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_external: false,
            concurrency: 8,
            fetch: FetchConfig::default(),
        }
    }
}

impl MapperConfig {
    /// Creates a new builder for MapperConfig.
    pub fn builder() -> MapperConfigBuilder {
        MapperConfigBuilder::new()
    }
}

/// Builder for [`MapperConfig`].
///
/// # Example
///
/// ```rust
/// use aranea_core::MapperConfig;
///
/// let config = MapperConfig::builder()
///     .max_depth(2)
///     .follow_external(false)
///     .concurrency(4)
///     .build();
/// assert_eq!(config.max_depth, Some(2));
/// ```
pub struct MapperConfigBuilder {
    config: MapperConfig,
}

impl MapperConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: MapperConfig::default() }
    }

    /// Sets the greatest link depth to fetch.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.config.max_depth = Some(value);
        self
    }

    /// Removes the depth limit.
    pub fn unlimited_depth(mut self) -> Self {
        self.config.max_depth = None;
        self
    }

    /// Sets whether links leaving the root's host are followed.
    pub fn follow_external(mut self, value: bool) -> Self {
        self.config.follow_external = value;
        self
    }

    /// Sets the bound on concurrent fetches.
    pub fn concurrency(mut self, value: usize) -> Self {
        self.config.concurrency = value;
        self
    }

    /// Sets the fetch configuration.
    pub fn fetch(mut self, value: FetchConfig) -> Self {
        self.config.fetch = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> MapperConfig {
        self.config
    }
}

impl Default for MapperConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer for traversal progress.
///
/// Implementations receive a callback as each URL is dispatched, mapped, or
/// fails to fetch. All methods default to no-ops, so an implementation only
/// overrides what it cares about; the mapper itself stays silent.
pub trait Progress: Send + Sync {
    /// A fetch for `url` is about to be dispatched.
    fn visiting(&self, _url: &str) {}

    /// `url` was added to the map with `children` outbound links.
    fn mapped(&self, _url: &str, _children: usize) {}

    /// Fetching `url` failed; the traversal continues without it.
    fn failed(&self, _url: &str, _error: &AraneaError) {}
}

/// The default observer: ignores everything.
pub struct SilentProgress;

impl Progress for SilentProgress {}

/// One fetch that failed during a traversal.
#[derive(Debug)]
pub struct FetchFailure {
    /// The URL that could not be mapped.
    pub url: String,
    /// Why the fetch failed.
    pub error: AraneaError,
}

/// Everything a traversal run produced.
#[derive(Debug)]
pub struct MapReport {
    /// The pages that were reached.
    pub pages: SiteMap,
    /// URLs that failed to fetch, in the order the failures surfaced.
    pub failures: Vec<FetchFailure>,
}

/// Breadth-first site traversal with depth budgets and domain scoping.
pub struct SiteMapper {
    config: MapperConfig,
    fetcher: Fetcher,
    progress: Arc<dyn Progress>,
}

impl SiteMapper {
    /// Creates a mapper from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AraneaError::Http`] if the HTTP client cannot be built.
    pub fn new(config: MapperConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch.clone())?;

        Ok(Self { config, fetcher, progress: Arc::new(SilentProgress) })
    }

    /// Replaces the progress observer.
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Maps the site reachable from `root_url`.
    pub async fn run(&self, root_url: &str) -> Result<MapReport> {
        self.run_with_cancel(root_url, CancellationToken::new()).await
    }

    /// Maps the site reachable from `root_url`, stopping early when `cancel`
    /// fires.
    ///
    /// Cancellation stops the dispatch of new fetches; fetches already in
    /// flight drain and their pages are kept. The partial map is returned
    /// normally; being cancelled is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AraneaError::InvalidUrl`] if the root URL cannot be
    /// parsed. Individual fetch failures never end the run; they are
    /// collected in the report's `failures`.
    pub async fn run_with_cancel(
        &self,
        root_url: &str,
        cancel: CancellationToken,
    ) -> Result<MapReport> {
        let root = canonicalize(root_url).to_string();
        let parsed_root =
            Url::parse(&root).map_err(|e| AraneaError::InvalidUrl(format!("{root}: {e}")))?;
        let scope = (!self.config.follow_external)
            .then(|| parsed_root.host_str().unwrap_or("").to_string());
        let concurrency = self.config.concurrency.max(1);

        let mut pages = SiteMap::new();
        let mut failures: Vec<FetchFailure> = Vec::new();

        // claimed holds every URL that was ever queued; membership here is
        // what guarantees at most one fetch per URL.
        let mut claimed: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(String, Option<usize>)> = VecDeque::new();
        claimed.insert(root.clone());
        queue.push_back((root, self.config.max_depth));

        let mut in_flight: JoinSet<(Option<usize>, String, Result<Page>)> = JoinSet::new();
        let mut cancelled = false;

        loop {
            if cancel.is_cancelled() {
                cancelled = true;
            }

            while !cancelled && in_flight.len() < concurrency {
                let Some((url, budget)) = queue.pop_front() else { break };

                if budget == Some(0) {
                    // Depth exhausted: record the page without fetching it.
                    self.progress.mapped(&url, 0);
                    pages.insert(Page::barren(&url));
                    continue;
                }

                self.progress.visiting(&url);
                let fetcher = self.fetcher.clone();
                in_flight.spawn(async move {
                    let fetched = Page::fetch(&url, &fetcher).await;
                    (budget, url, fetched)
                });
            }

            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled(), if !cancelled => {
                    cancelled = true;
                }
                joined = in_flight.join_next() => {
                    let Some(Ok((budget, url, fetched))) = joined else { continue };

                    match fetched {
                        Ok(page) => {
                            self.progress.mapped(&page.url, page.children.len());
                            if !cancelled {
                                let next_budget = budget.map(|depth| depth - 1);
                                for child in &page.children {
                                    if !in_scope(child, scope.as_deref()) {
                                        continue;
                                    }
                                    let child = canonicalize(child).to_string();
                                    if claimed.insert(child.clone()) {
                                        queue.push_back((child, next_budget));
                                    }
                                }
                            }
                            pages.insert(page);
                        }
                        Err(error) => {
                            self.progress.failed(&url, &error);
                            failures.push(FetchFailure { url, error });
                        }
                    }
                }
            }
        }

        Ok(MapReport { pages, failures })
    }
}

/// Whether a child link stays on the scoped host.
///
/// With no scope every parseable link qualifies; an unparseable link never
/// does, since it could not be fetched anyway.
fn in_scope(child: &str, scope: Option<&str>) -> bool {
    let Ok(parsed) = Url::parse(child) else { return false };

    match scope {
        Some(host) => parsed.host_str().unwrap_or("") == host,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MapperConfig::default();
        assert_eq!(config.max_depth, None);
        assert!(!config.follow_external);
        assert_eq!(config.concurrency, 8);
    }

    #[test]
    fn test_builder_round_trip() {
        let config = MapperConfig::builder()
            .max_depth(3)
            .follow_external(true)
            .concurrency(2)
            .build();

        assert_eq!(config.max_depth, Some(3));
        assert!(config.follow_external);
        assert_eq!(config.concurrency, 2);
    }

    #[test]
    fn test_in_scope_compares_hosts() {
        assert!(in_scope("https://a.com/page", Some("a.com")));
        assert!(!in_scope("https://b.com/page", Some("a.com")));
        assert!(in_scope("https://b.com/page", None));
    }

    #[test]
    fn test_file_urls_share_the_empty_host() {
        assert!(in_scope("file:///tmp/site/page.html", Some("")));
        assert!(!in_scope("https://b.com/page", Some("")));
    }

    #[test]
    fn test_unparseable_links_are_never_in_scope() {
        assert!(!in_scope("::not a url::", None));
    }

    #[tokio::test]
    async fn test_invalid_root_aborts_before_any_work() {
        let mapper = SiteMapper::new(MapperConfig::default()).unwrap();
        let result = mapper.run("BAD_URL").await;

        assert!(matches!(result, Err(AraneaError::InvalidUrl(_))));
    }
}
