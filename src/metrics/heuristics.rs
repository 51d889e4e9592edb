//! URL and Initiator Heuristics
//!
//! Helpers the sampler uses to name resources, guess their kind and spot
//! asynchronous API traffic.
//!
//! # Resource Kind Priority
//!
//! 1. A specific initiator type (`script`, `link`, `img`, ...) decides
//!    the kind outright, whatever the URL looks like.
//! 2. Generic initiators (`other`, `css`, empty, or anything unknown)
//!    fall back to the URL's file extension.
//! 3. No recognizable extension yields [`ResourceKind::Other`].

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Initiator types that always denote an asynchronous request.
pub const ASYNC_INITIATORS: &[&str] = &["fetch", "xmlhttprequest", "beacon"];

/// Coarse classification of a fetched resource.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceKind {
    #[serde(rename = "script")]
    Script,
    #[serde(rename = "style")]
    Style,
    #[serde(rename = "img")]
    Image,
    #[serde(rename = "font")]
    Font,
    #[serde(rename = "media")]
    Media,
    #[serde(rename = "document")]
    Document,
    #[serde(rename = "xhr")]
    Xhr,
    #[default]
    #[serde(rename = "other")]
    Other,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Style => "style",
            Self::Image => "img",
            Self::Font => "font",
            Self::Media => "media",
            Self::Document => "document",
            Self::Xhr => "xhr",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static INITIATOR_KINDS: Lazy<HashMap<&'static str, ResourceKind>> = Lazy::new(|| {
    HashMap::from([
        ("script", ResourceKind::Script),
        ("link", ResourceKind::Style),
        ("img", ResourceKind::Image),
        ("image", ResourceKind::Image),
        ("input", ResourceKind::Image),
        ("icon", ResourceKind::Image),
        ("video", ResourceKind::Media),
        ("audio", ResourceKind::Media),
        ("track", ResourceKind::Media),
        ("iframe", ResourceKind::Document),
        ("frame", ResourceKind::Document),
        ("navigation", ResourceKind::Document),
        ("fetch", ResourceKind::Xhr),
        ("xmlhttprequest", ResourceKind::Xhr),
        ("beacon", ResourceKind::Xhr),
    ])
});

static EXTENSION_KINDS: Lazy<HashMap<&'static str, ResourceKind>> = Lazy::new(|| {
    HashMap::from([
        ("js", ResourceKind::Script),
        ("mjs", ResourceKind::Script),
        ("cjs", ResourceKind::Script),
        ("css", ResourceKind::Style),
        ("png", ResourceKind::Image),
        ("jpg", ResourceKind::Image),
        ("jpeg", ResourceKind::Image),
        ("gif", ResourceKind::Image),
        ("webp", ResourceKind::Image),
        ("avif", ResourceKind::Image),
        ("svg", ResourceKind::Image),
        ("ico", ResourceKind::Image),
        ("bmp", ResourceKind::Image),
        ("woff", ResourceKind::Font),
        ("woff2", ResourceKind::Font),
        ("ttf", ResourceKind::Font),
        ("otf", ResourceKind::Font),
        ("eot", ResourceKind::Font),
        ("mp4", ResourceKind::Media),
        ("webm", ResourceKind::Media),
        ("ogg", ResourceKind::Media),
        ("mp3", ResourceKind::Media),
        ("wav", ResourceKind::Media),
        ("html", ResourceKind::Document),
        ("htm", ResourceKind::Document),
        ("json", ResourceKind::Xhr),
    ])
});

/// Returns the path component of a URL, without query or fragment.
///
/// Accepts absolute (`https://host/a/b`), protocol-relative
/// (`//host/a/b`) and path-only (`/a/b`) forms.
pub fn url_path(url: &str) -> &str {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let url = &url[..end];

    let after_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None if url.starts_with("//") => &url[2..],
        None => return url,
    };

    match after_scheme.find('/') {
        Some(idx) => &after_scheme[idx..],
        None => "",
    }
}

fn url_host(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None if url.starts_with("//") => &url[2..],
        None => return "",
    };

    let end = rest.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    &rest[..end]
}

/// Returns the last non-empty path segment of a URL.
///
/// Falls back to the host for bare origins and to the input itself when
/// neither exists.
///
/// ```
/// use perfgauge::metrics::heuristics::last_path_segment;
///
/// assert_eq!(last_path_segment("https://cdn.example.com/js/app.js?v=3"), "app.js");
/// assert_eq!(last_path_segment("https://example.com/"), "example.com");
/// ```
pub fn last_path_segment(url: &str) -> String {
    if let Some(segment) = url_path(url).split('/').filter(|s| !s.is_empty()).last() {
        return segment.to_string();
    }

    let host = url_host(url);
    if !host.is_empty() {
        return host.to_string();
    }

    url.to_string()
}

/// Lower-cased file extension of the URL's last path segment.
fn file_extension(url: &str) -> Option<String> {
    let segment = url_path(url).rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Resolves a resource's kind from its initiator type and URL.
pub fn resource_kind(initiator_type: &str, url: &str) -> ResourceKind {
    let initiator = initiator_type.trim().to_ascii_lowercase();
    if let Some(kind) = INITIATOR_KINDS.get(initiator.as_str()) {
        return *kind;
    }

    file_extension(url)
        .and_then(|ext| EXTENSION_KINDS.get(ext.as_str()).copied())
        .unwrap_or(ResourceKind::Other)
}

/// Returns true if the URL path looks like an API endpoint.
///
/// Matches paths containing `/api/` or ending in `graphql`
/// (case-insensitive).
pub fn is_api_like(url: &str) -> bool {
    let path = url_path(url).to_ascii_lowercase();
    let trimmed = path.trim_end_matches('/');

    path.contains("/api/") || trimmed.ends_with("graphql")
}

/// Returns true if the entry should count as an asynchronous request.
pub fn is_async_request(initiator_type: &str, url: &str) -> bool {
    let initiator = initiator_type.trim().to_ascii_lowercase();
    ASYNC_INITIATORS.contains(&initiator.as_str()) || is_api_like(url)
}
