//! Meta document rendering
//!
//! Assembles the go-import / go-source meta contents and the redirect
//! HTML document for a matched package rule. Pure string work: every
//! call terminates with a complete document regardless of input.

use crate::config::PackageRule;
use crate::routing::ensure_leading_slash;

use super::{trim_slashes, trim_trailing_slashes, ForgeStyle, ResolvedSite};

/// Render the HTML document for a matched rule
///
/// `path` is the raw request path; `site` is the per-request resolved
/// view of the site configuration.
pub fn render(path: &str, site: &ResolvedSite<'_>, rule: &PackageRule) -> String {
    let path = ensure_leading_slash(path);

    // example.com/foo, never carrying a scheme
    let import_prefix = format!("{}/{}", site.host, trim_slashes(&rule.prefix));
    let repo = trim_trailing_slashes(&rule.repo);

    // go-import: <import-prefix> <vcs> <repo> [subdir]
    let mut go_import = format!("{import_prefix} {} {repo}", rule.vcs.as_str());
    if let Some(subdir) = rule.subdir.as_deref() {
        let subdir = trim_slashes(subdir);
        // A bare "/" trims to nothing and is dropped
        if !subdir.is_empty() {
            go_import.push(' ');
            go_import.push_str(subdir);
        }
    }

    let go_source = rule.go_source.as_ref().map_or_else(
        || ForgeStyle::detect(repo).source_line(&import_prefix, repo, site.default_branch),
        Clone::clone,
    );

    let doc_url = format!("https://{}/{}{}", site.doc_host, site.host, path);

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta name="go-import" content="{go_import}">
    <meta name="go-source" content="{go_source}">
    <meta http-equiv="refresh" content="0; url={doc_url}">
  </head>
  <body>
    Nothing to see here. Please <a href="{doc_url}">move along</a>.
  </body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, VcsKind};

    fn make_rule(prefix: &str, repo: &str) -> PackageRule {
        PackageRule {
            prefix: prefix.to_string(),
            repo: repo.to_string(),
            vcs: VcsKind::Git,
            subdir: None,
            go_source: None,
        }
    }

    fn make_site(site: &SiteConfig) -> ResolvedSite<'_> {
        ResolvedSite::new(site, "example.com")
    }

    fn meta_content<'a>(html: &'a str, name: &str) -> &'a str {
        let marker = format!("<meta name=\"{name}\" content=\"");
        let start = html.find(&marker).expect("meta tag present") + marker.len();
        let end = html[start..].find('"').expect("content closed") + start;
        &html[start..end]
    }

    #[test]
    fn test_basic_scenario() {
        let config = SiteConfig {
            canonical_host: Some("example.com".to_string()),
            ..SiteConfig::default()
        };
        let site = ResolvedSite::new(&config, "ignored.host");
        let rule = make_rule("foo", "https://github.com/user/repo");
        let html = render("/foo/bar", &site, &rule);

        assert_eq!(
            meta_content(&html, "go-import"),
            "example.com/foo git https://github.com/user/repo"
        );
        assert_eq!(
            meta_content(&html, "go-source"),
            "example.com/foo https://github.com/user/repo \
             https://github.com/user/repo/tree/main{/dir} \
             https://github.com/user/repo/blob/main{/dir}/{file}#L{line}"
        );
        assert!(html.contains("url=https://pkg.go.dev/example.com/foo/bar"));
        assert!(html.contains("<a href=\"https://pkg.go.dev/example.com/foo/bar\">"));
    }

    #[test]
    fn test_subdir_appended_trimmed() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let mut rule = make_rule("tools", "https://github.com/user/tools");
        rule.subdir = Some("/cmd/tool".to_string());
        let html = render("/tools", &site, &rule);
        assert_eq!(
            meta_content(&html, "go-import"),
            "example.com/tools git https://github.com/user/tools cmd/tool"
        );
    }

    #[test]
    fn test_bare_slash_subdir_dropped() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let mut rule = make_rule("tools", "https://github.com/user/tools");
        rule.subdir = Some("/".to_string());
        let html = render("/tools", &site, &rule);
        assert_eq!(
            meta_content(&html, "go-import"),
            "example.com/tools git https://github.com/user/tools"
        );
    }

    #[test]
    fn test_trailing_slash_repo_stripped_once() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let rule = make_rule("foo", "https://github.com/user/repo/");
        let html = render("/foo", &site, &rule);
        assert_eq!(
            meta_content(&html, "go-import"),
            "example.com/foo git https://github.com/user/repo"
        );
        // Derived templates must never carry double slashes past the scheme
        let source = meta_content(&html, "go-source");
        assert!(!source.replace("://", "").contains("//"));
    }

    #[test]
    fn test_explicit_go_source_used_verbatim() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let mut rule = make_rule("foo", "https://example.org/user/repo");
        rule.go_source = Some("custom go-source line".to_string());
        let html = render("/foo", &site, &rule);
        assert_eq!(meta_content(&html, "go-source"), "custom go-source line");
    }

    #[test]
    fn test_bitbucket_layout() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let rule = make_rule("foo", "https://bitbucket.org/user/repo");
        let html = render("/foo", &site, &rule);
        assert_eq!(
            meta_content(&html, "go-source"),
            "example.com/foo https://bitbucket.org/user/repo \
             https://bitbucket.org/user/repo/src/default{/dir} \
             https://bitbucket.org/user/repo/src/default{/dir}/{file}#{file}-{line}"
        );
    }

    #[test]
    fn test_non_git_vcs_token() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let mut rule = make_rule("foo", "https://example.org/repo");
        rule.vcs = VcsKind::Hg;
        let html = render("/foo", &site, &rule);
        assert_eq!(
            meta_content(&html, "go-import"),
            "example.com/foo hg https://example.org/repo"
        );
    }

    #[test]
    fn test_scheme_stripped_from_canonical_host() {
        let config = SiteConfig {
            canonical_host: Some("https://example.com/".to_string()),
            ..SiteConfig::default()
        };
        let site = ResolvedSite::new(&config, "other.host");
        let rule = make_rule("foo", "https://github.com/user/repo");
        let html = render("/foo", &site, &rule);
        assert_eq!(
            meta_content(&html, "go-import"),
            "example.com/foo git https://github.com/user/repo"
        );
        assert!(html.contains("url=https://pkg.go.dev/example.com/foo"));
    }

    #[test]
    fn test_document_shape() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let rule = make_rule("foo", "https://github.com/user/repo");
        let html = render("/foo", &site, &rule);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<meta ").count(), 3);
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("Nothing to see here."));
    }

    #[test]
    fn test_path_without_leading_slash_normalized_in_doc_url() {
        let config = SiteConfig::default();
        let site = make_site(&config);
        let rule = make_rule("foo", "https://github.com/user/repo");
        let html = render("foo/bar", &site, &rule);
        assert!(html.contains("url=https://pkg.go.dev/example.com/foo/bar"));
    }
}
