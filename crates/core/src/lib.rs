pub mod error;
pub mod extract;
pub mod fetch;
pub mod mapper;
pub mod mirror;
pub mod normalize;
pub mod page;
pub mod patterns;
pub mod sitemap;

pub use error::{AraneaError, Result};
pub use extract::{Extractor, clean_html};
pub use fetch::{FetchConfig, Fetcher};
pub use mapper::{
    FetchFailure, MapReport, MapperConfig, MapperConfigBuilder, Progress, SilentProgress,
    SiteMapper,
};
pub use mirror::mirror_map;
pub use normalize::{canonicalize, normalize_link};
pub use page::Page;
pub use sitemap::SiteMap;

// Re-exported so binaries can cancel a traversal without depending on
// tokio-util themselves.
pub use tokio_util::sync::CancellationToken;
