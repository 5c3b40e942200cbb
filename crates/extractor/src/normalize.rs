use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::types::NormalizedPath;

/// Checkout roots used by hosted CI providers, matched against the
/// slash-normalized path.
const WORKSPACE_PREFIXES: &[&str] = &[
    // GitHub Actions Windows runners; also Azure Pipelines `D:/a/1/s`.
    r"[A-Za-z]:/a/[^/]+/[^/]+",
    r"/home/runner/work/[^/]+/[^/]+",
    r"/Users/runner/work/[^/]+/[^/]+",
    // GitHub Actions container jobs.
    r"/__w/[^/]+/[^/]+",
    r"/github/workspace",
    r"/home/vsts/work/[0-9]+/s",
    // GitLab CI.
    r"/builds/[^/]+/[^/]+",
    r"/var/lib/jenkins/workspace/[^/]+",
    r"/home/jenkins/agent/workspace/[^/]+",
    r"/var/lib/buildkite-agent/builds/[^/]+/[^/]+/[^/]+",
    r"/home/travis/build/[^/]+/[^/]+",
    r"/home/circleci/project",
    r"~/project",
    r"/opt/atlassian/pipelines/agent/build",
    r"/drone/src",
    r"/workspace",
];

fn workspace_regex(case_insensitive: bool) -> Regex {
    let pattern = format!("^(?:{})(?:/|$)", WORKSPACE_PREFIXES.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
        .expect("workspace prefix patterns must compile")
}

static WORKSPACE: Lazy<Regex> = Lazy::new(|| workspace_regex(false));
static WORKSPACE_ANY_CASE: Lazy<Regex> = Lazy::new(|| workspace_regex(true));

/// Operating-system family a path token most likely comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformHint {
    #[default]
    Unix,
    /// Prefix matching ignores ASCII case
    Windows,
}

impl PlatformHint {
    /// Guess from the token itself: a drive letter or a backslash means Windows.
    #[must_use]
    pub fn detect(raw: &str) -> Self {
        let token = raw
            .trim_matches(|c| c == '"' || c == '\'')
            .trim_start_matches("file:///");
        if token.contains('\\') || has_drive(token) {
            PlatformHint::Windows
        } else {
            PlatformHint::Unix
        }
    }
}

fn has_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Canonicalizes raw path tokens into `/`-separated, repository-relative form
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer {
    extra_prefixes: Vec<String>,
}

impl PathNormalizer {
    /// `extra_prefixes` are checkout roots checked before the built-in ones.
    pub fn new<S: AsRef<str>>(extra_prefixes: &[S]) -> Self {
        let extra_prefixes = extra_prefixes
            .iter()
            .map(|p| clean_separators(p.as_ref()))
            .filter(|p| !p.is_empty() && p != "/")
            .collect();
        Self { extra_prefixes }
    }

    /// Normalize a raw token. Idempotent on the returned `path`.
    #[must_use]
    pub fn normalize(&self, raw: &str, hint: PlatformHint) -> NormalizedPath {
        let mut path = clean_separators(raw);

        let mut repo_rooted = false;
        if let Some(rest) = self.strip_workspace(&path, hint) {
            path = rest;
            repo_rooted = true;
        } else if has_drive(&path) {
            path = path[2..].to_string();
            if let Some(rest) = self.strip_workspace(&path, hint) {
                path = rest;
                repo_rooted = true;
            }
        }

        let absolute = !repo_rooted && (path.starts_with('/') || path.starts_with("~/"));
        NormalizedPath {
            path,
            repo_rooted,
            absolute,
        }
    }

    /// Normalize an anchor root to a repository-relative directory.
    ///
    /// An empty result means the repository root. Unrecognized absolute roots
    /// fall back to their last component, or to the repository root when the
    /// last two components are equal (`.../repo/repo`).
    #[must_use]
    pub fn normalize_root(&self, raw: &str) -> String {
        let normalized = self.normalize(raw, PlatformHint::detect(raw));
        let path = normalized.path.trim_end_matches('/');
        if !normalized.absolute {
            return path.to_string();
        }

        let mut parts = path.rsplit('/').filter(|p| !p.is_empty() && *p != "~");
        match (parts.next(), parts.next()) {
            (Some(last), Some(parent)) if parent == last => String::new(),
            (Some(last), _) => last.to_string(),
            (None, _) => String::new(),
        }
    }

    fn strip_workspace(&self, path: &str, hint: PlatformHint) -> Option<String> {
        let any_case = hint == PlatformHint::Windows;

        for prefix in &self.extra_prefixes {
            if let Some(rest) = strip_prefix_dir(path, prefix, any_case) {
                return Some(rest.to_string());
            }
        }

        let workspace = if any_case { &*WORKSPACE_ANY_CASE } else { &*WORKSPACE };
        workspace
            .find(path)
            .map(|found| path[found.end()..].to_string())
    }
}

/// Strip `prefix` when it covers whole path segments.
fn strip_prefix_dir<'a>(path: &'a str, prefix: &str, any_case: bool) -> Option<&'a str> {
    let head = path.get(..prefix.len())?;
    let matched = if any_case {
        head.eq_ignore_ascii_case(prefix)
    } else {
        head == prefix
    };
    if !matched {
        return None;
    }

    let rest = &path[prefix.len()..];
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Trim quotes, drop `file://`, convert separators and collapse `//` and `./`.
fn clean_separators(raw: &str) -> String {
    let token = raw.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`');
    let token = token.strip_prefix("file://").unwrap_or(token);
    let mut token = token.replace('\\', "/");
    if token.len() >= 3 && token.starts_with('/') && has_drive(&token[1..]) {
        token.remove(0);
    }

    let rooted = token.starts_with('/');
    let segments: Vec<&str> = token
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Reduce a path that still points outside the repository to its file name.
#[must_use]
pub fn repo_relative(path: &str) -> String {
    let escapes = path.split('/').any(|segment| segment == "..");
    if path.starts_with('/') || path.starts_with("~/") || escapes {
        path.rsplit('/').next().unwrap_or(path).to_string()
    } else {
        path.to_string()
    }
}
