//! go-source template strategy
//!
//! Derives source-browsing URL templates from the repository host when a
//! rule does not override them. Adding a forge convention means one new
//! variant and one new match arm; matching and rendering stay untouched.

use super::strip_scheme;

/// Recognized source-browsing URL layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgeStyle {
    /// Bitbucket's fossil-style layout, rooted at the fixed `default`
    /// branch path segment
    Bitbucket,
    /// GitHub-convention tree/blob layout, used as the fallback for any
    /// unrecognized host
    Generic,
}

impl ForgeStyle {
    /// Pick a layout from the repository URL's host component
    ///
    /// Detection ignores the scheme, so "bitbucket.org/x", "http://..."
    /// and "https://..." all resolve the same way.
    pub fn detect(repo: &str) -> Self {
        let host = strip_scheme(repo).split('/').next().unwrap_or("");
        if host.eq_ignore_ascii_case("bitbucket.org") {
            Self::Bitbucket
        } else {
            Self::Generic
        }
    }

    /// Build the 4-field go-source meta content
    ///
    /// `repo` must already have trailing slashes trimmed. The `{/dir}`,
    /// `{file}` and `{line}` tokens are placeholders expanded downstream
    /// by the consuming tooling, not by this server.
    pub fn source_line(self, import_prefix: &str, repo: &str, branch: &str) -> String {
        match self {
            Self::Bitbucket => format!(
                "{import_prefix} {repo} {repo}/src/default{{/dir}} \
                 {repo}/src/default{{/dir}}/{{file}}#{{file}}-{{line}}"
            ),
            Self::Generic => format!(
                "{import_prefix} {repo} {repo}/tree/{branch}{{/dir}} \
                 {repo}/blob/{branch}{{/dir}}/{{file}}#L{{line}}"
            ),
        }
    }
}
