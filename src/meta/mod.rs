//! Meta document module
//!
//! Renders the HTML documents served for matched package rules:
//! - go-import and go-source meta content assembly
//! - documentation redirect targets
//! - per-request resolution of site defaults

mod renderer;
mod source;

pub use renderer::render;
pub use source::ForgeStyle;

use crate::config::SiteConfig;

/// Fully-defaulted site view for one request
///
/// Borrowed from the shared configuration and the request's Host value.
/// Defaulting happens here, per request, so the shared `SiteConfig` is
/// never written to.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSite<'a> {
    /// Canonical host without scheme or trailing slashes
    pub host: &'a str,
    /// Documentation host without scheme or trailing slashes
    pub doc_host: &'a str,
    /// Branch name for derived source-browsing templates
    pub default_branch: &'a str,
    /// Suppress the per-request access log line
    pub quiet: bool,
}

impl<'a> ResolvedSite<'a> {
    /// Resolve site defaults against the incoming request's host
    pub fn new(site: &'a SiteConfig, request_host: &'a str) -> Self {
        let host = site.canonical_host.as_deref().unwrap_or(request_host);
        Self {
            host: trim_trailing_slashes(strip_scheme(host)),
            doc_host: trim_trailing_slashes(strip_scheme(&site.doc_host)),
            default_branch: &site.default_branch,
            quiet: site.quiet,
        }
    }
}

/// Drop a leading protocol scheme ("https://host/x" becomes "host/x")
pub fn strip_scheme(value: &str) -> &str {
    value.split_once("://").map_or(value, |(_, rest)| rest)
}

/// Trim slashes from both ends of a path fragment
pub fn trim_slashes(value: &str) -> &str {
    value.trim_matches('/')
}

/// Trim trailing slashes only, keeping any leading one
pub fn trim_trailing_slashes(value: &str) -> &str {
    value.trim_end_matches('/')
}
