//! Local mirroring of mapped pages.
//!
//! Writes each page's HTML under a destination root, using the path
//! component of the page URL as the relative file path. Most sites hold far
//! more pages than expected, so callers should make sure the destination
//! has room before mirroring a large map.

use std::fs;
use std::path::Path;

use url::Url;

use crate::Result;
use crate::sitemap::SiteMap;

/// Writes every page of the map below `dest`, returning how many files
/// were written.
///
/// The target path is `dest` joined with the URL's path component. Pages
/// whose URL has no path, and pages whose target collides with an existing
/// directory, are skipped. Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`AraneaError::Io`](crate::AraneaError::Io) if a directory or
/// file cannot be written.
pub fn mirror_map(map: &SiteMap, dest: &Path) -> Result<usize> {
    let mut written = 0;

    for page in map {
        let Ok(parsed) = Url::parse(&page.url) else { continue };
        let path = parsed.path();
        if path.is_empty() || path == "/" {
            continue;
        }

        let target = dest.join(path.trim_start_matches('/'));
        if target.is_dir() {
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &page.html)?;
        written += 1;
    }

    Ok(written)
}
