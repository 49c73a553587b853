//! Link normalization.
//!
//! Every link harvested from a page is resolved against the URL of the page
//! it was found on, producing an absolute, canonical URL string. The
//! transformation is pure: no network access, no failure for anything that
//! looks like a URL. Links that cannot be interpreted at all are dropped
//! silently by returning `None`; real-world markup is not always well
//! formed, and a single garbage `href` should never surface as an error.
//!
//! # Example
//!
//! ```rust
//! use aranea_core::normalize::normalize_link;
//!
//! let parent = "https://domain.com/path/index.html";
//! assert_eq!(
//!     normalize_link(parent, "about.html").as_deref(),
//!     Some("https://domain.com/path/about.html")
//! );
//! assert_eq!(
//!     normalize_link(parent, "../top.html").as_deref(),
//!     Some("https://domain.com/top.html")
//! );
//! ```

use url::Url;

/// Strips exactly one trailing `/` from a URL, the canonical form used for
/// page identity throughout the crate.
pub fn canonicalize(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Normalizes a child link against the URL of the page it was found on.
///
/// A child that already carries a scheme is returned verbatim, so
/// normalization of an absolute URL is the identity. Otherwise the result is
/// built from the parent's scheme and authority, the child's path resolved
/// against the parent's directory (with `.` and `..` segments collapsed),
/// and the child's own params, query, and fragment re-appended in that
/// order. The parent's query and fragment are never inherited.
///
/// Returns `None` when the parent cannot be parsed as an absolute URL.
pub fn normalize_link(parent: &str, child: &str) -> Option<String> {
    if has_scheme(child) {
        return Some(child.to_string());
    }

    let parent = Url::parse(parent).ok()?;
    let (path, params, query, fragment) = split_link(child);

    let mut normalized = String::from(parent.scheme());
    normalized.push_str("://");
    if let Some(host) = parent.host_str() {
        normalized.push_str(host);
        if let Some(port) = parent.port() {
            normalized.push(':');
            normalized.push_str(&port.to_string());
        }
    }

    if path.starts_with('/') {
        normalized.push_str(&collapse_path(path));
    } else {
        let directory = parent_directory(parent.path());
        normalized.push_str(&collapse_path(&format!("{directory}/{path}")));
    }

    if let Some(params) = params {
        normalized.push(';');
        normalized.push_str(params);
    }
    if let Some(query) = query {
        normalized.push('?');
        normalized.push_str(query);
    }
    if let Some(fragment) = fragment {
        normalized.push('#');
        normalized.push_str(fragment);
    }

    Some(normalized)
}

/// Whether the link opens with a URL scheme (`https:`, `mailto:`, ...),
/// meaning it is already absolute.
fn has_scheme(link: &str) -> bool {
    match link.find(':') {
        Some(idx) if idx > 0 => {
            let prefix = &link[..idx];
            prefix.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && prefix
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Splits a relative link into its path, params, query, and fragment parts.
///
/// Params are only recognized in the final path segment, matching the
/// `;params` production of generic URL syntax.
fn split_link(link: &str) -> (&str, Option<&str>, Option<&str>, Option<&str>) {
    let (rest, fragment) = match link.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (link, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(query)),
        None => (rest, None),
    };

    let last_segment_start = rest.rfind('/').map_or(0, |idx| idx + 1);
    match rest[last_segment_start..].find(';') {
        Some(idx) => {
            let split_at = last_segment_start + idx;
            (&rest[..split_at], Some(&rest[split_at + 1..]), query, fragment)
        }
        None => (rest, None, query, fragment),
    }
}

/// Collapses `.`, `..`, and empty segments out of an absolute path.
///
/// `..` never climbs above the root, and the result carries no trailing
/// slash except for the root path itself.
fn collapse_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let mut collapsed = String::from("/");
    collapsed.push_str(&segments.join("/"));
    collapsed
}

/// The directory portion of a path: everything up to the final segment.
fn parent_directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}
