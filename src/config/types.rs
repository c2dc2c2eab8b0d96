// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Vanity site configuration (import rules and rendering defaults)
    #[serde(default)]
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Access log format ("common" or "json")
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

// ============================================
// Vanity site types
// ============================================

/// Vanity site configuration
///
/// Controls how package rules are matched and how meta documents are
/// rendered. `canonical_host` falls back to the incoming request's Host
/// value when unset, resolved per request on a local copy.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteConfig {
    /// Documentation host used for the browser redirect
    #[serde(default = "default_doc_host")]
    pub doc_host: String,
    /// Host prepended to rule prefixes in generated import paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_host: Option<String>,
    /// Branch name substituted into derived source-browsing templates
    #[serde(default = "default_branch_name")]
    pub default_branch: String,
    /// Suppress the per-request access log line
    #[serde(default = "default_quiet")]
    pub quiet: bool,
    /// Package rules, matched in order
    #[serde(default)]
    pub packages: Vec<PackageRule>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_doc_host() -> String {
    "pkg.go.dev".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_branch_name() -> String {
    "main".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_quiet() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            doc_host: default_doc_host(),
            canonical_host: None,
            default_branch: default_branch_name(),
            quiet: default_quiet(),
            packages: Vec::new(),
        }
    }
}

/// A single vanity package rule
///
/// Maps a path prefix to the repository behind it. Rules are immutable
/// after load and carry no identity beyond field equality.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PackageRule {
    /// Path prefix, with or without a leading slash ("foo", "/foo/bar")
    pub prefix: String,
    /// Repository URL on the source-control host
    pub repo: String,
    /// Version control system (defaults to git)
    #[serde(default)]
    pub vcs: VcsKind,
    /// Subdirectory within the repository holding the package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,
    /// Explicit go-source meta content, overriding the derived template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_source: Option<String>,
}

/// Supported version control systems
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    #[default]
    Git,
    Fossil,
    Hg,
    Bzr,
    Svn,
}

impl VcsKind {
    /// Token emitted in the go-import meta content
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Fossil => "fossil",
            Self::Hg => "hg",
            Self::Bzr => "bzr",
            Self::Svn => "svn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_defaults() {
        let site = SiteConfig::default();
        assert_eq!(site.doc_host, "pkg.go.dev");
        assert_eq!(site.default_branch, "main");
        assert!(site.quiet);
        assert!(site.canonical_host.is_none());
        assert!(site.packages.is_empty());
    }

    #[test]
    fn test_vcs_defaults_to_git() {
        let rule: PackageRule = toml::from_str(
            r#"
            prefix = "foo"
            repo = "https://github.com/user/repo"
            "#,
        )
        .unwrap();
        assert_eq!(rule.vcs, VcsKind::Git);
        assert!(rule.subdir.is_none());
        assert!(rule.go_source.is_none());
    }

    #[test]
    fn test_vcs_tokens() {
        assert_eq!(VcsKind::Git.as_str(), "git");
        assert_eq!(VcsKind::Fossil.as_str(), "fossil");
        assert_eq!(VcsKind::Hg.as_str(), "hg");
        assert_eq!(VcsKind::Bzr.as_str(), "bzr");
        assert_eq!(VcsKind::Svn.as_str(), "svn");
    }

    #[test]
    fn test_rule_parses_all_fields() {
        let rule: PackageRule = toml::from_str(
            r#"
            prefix = "tools"
            repo = "https://example.org/group/tools"
            vcs = "hg"
            subdir = "/cmd/tool"
            go_source = "custom source line"
            "#,
        )
        .unwrap();
        assert_eq!(rule.vcs, VcsKind::Hg);
        assert_eq!(rule.subdir.as_deref(), Some("/cmd/tool"));
        assert_eq!(rule.go_source.as_deref(), Some("custom source line"));
    }

    #[test]
    fn test_unknown_vcs_rejected() {
        let result: Result<PackageRule, _> = toml::from_str(
            r#"
            prefix = "foo"
            repo = "https://github.com/user/repo"
            vcs = "cvs"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_site_section_parses() {
        let site: SiteConfig = toml::from_str(
            r#"
            canonical_host = "example.com"
            quiet = false

            [[packages]]
            prefix = "foo"
            repo = "https://github.com/user/repo"
            "#,
        )
        .unwrap();
        assert_eq!(site.canonical_host.as_deref(), Some("example.com"));
        assert!(!site.quiet);
        assert_eq!(site.doc_host, "pkg.go.dev");
        assert_eq!(site.packages.len(), 1);
    }
}
