//! Package rule matching module
//!
//! Implements path normalization and prefix matching for package rules.

use std::borrow::Cow;

use crate::config::PackageRule;

/// Normalize a request path so it always carries a leading slash
///
/// Paths that already start with "/" are returned as-is. The empty string
/// becomes "/".
pub fn ensure_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Find the first rule matching a given request path
///
/// A rule matches when its normalized prefix equals the path exactly, or
/// when the path continues past the prefix at a "/" boundary. "/foo" never
/// matches a "/foobar" rule. Rules are checked in configuration order.
pub fn match_rule<'a>(path: &str, rules: &'a [PackageRule]) -> Option<&'a PackageRule> {
    let path = ensure_leading_slash(path);
    rules.iter().find(|rule| matches_prefix(&path, &rule.prefix))
}

/// Check if a normalized path falls under a rule prefix
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = ensure_leading_slash(prefix);
    match path.strip_prefix(prefix.as_ref()) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VcsKind;

    fn make_rule(prefix: &str) -> PackageRule {
        PackageRule {
            prefix: prefix.to_string(),
            repo: format!("https://github.com/example{}", ensure_leading_slash(prefix)),
            vcs: VcsKind::Git,
            subdir: None,
            go_source: None,
        }
    }

    #[test]
    fn test_ensure_leading_slash() {
        assert_eq!(ensure_leading_slash("foo"), "/foo");
        assert_eq!(ensure_leading_slash("/foo"), "/foo");
        assert_eq!(ensure_leading_slash(""), "/");
        assert_eq!(ensure_leading_slash("foo/bar"), "/foo/bar");
    }

    #[test]
    fn test_match_exact() {
        let rules = vec![make_rule("foo")];
        assert!(match_rule("/foo", &rules).is_some());
    }

    #[test]
    fn test_match_subpath() {
        let rules = vec![make_rule("foo")];
        assert!(match_rule("/foo/bar", &rules).is_some());
        assert!(match_rule("/foo/bar/baz", &rules).is_some());
    }

    #[test]
    fn test_no_match_on_sibling_name() {
        // "/foo" must not capture "/foobar"
        let rules = vec![make_rule("foo")];
        assert!(match_rule("/foobar", &rules).is_none());
        assert!(match_rule("/foobar/baz", &rules).is_none());
    }

    #[test]
    fn test_prefix_without_leading_slash() {
        // Rule prefixes are normalized the same way request paths are
        let rules = vec![make_rule("foo/bar")];
        assert!(match_rule("/foo/bar", &rules).is_some());
        assert!(match_rule("foo/bar/baz", &rules).is_some());
        assert!(match_rule("/foo", &rules).is_none());
    }

    #[test]
    fn test_match_rule_order() {
        let rules = vec![make_rule("tools/cli"), make_rule("tools")];

        // Should match first applicable rule in order
        let result = match_rule("/tools/cli/internal", &rules);
        assert_eq!(result.map(|r| r.prefix.as_str()), Some("tools/cli"));

        let result = match_rule("/tools/other", &rules);
        assert_eq!(result.map(|r| r.prefix.as_str()), Some("tools"));
    }

    #[test]
    fn test_shadowed_rule_never_wins() {
        // A broad rule listed first shadows a narrower one listed later
        let rules = vec![make_rule("tools"), make_rule("tools/cli")];
        let result = match_rule("/tools/cli", &rules);
        assert_eq!(result.map(|r| r.prefix.as_str()), Some("tools"));
    }

    #[test]
    fn test_no_rules() {
        assert!(match_rule("/anything", &[]).is_none());
    }

    #[test]
    fn test_empty_path_matches_only_root_prefix() {
        let rules = vec![make_rule("foo")];
        assert!(match_rule("", &rules).is_none());
    }
}
