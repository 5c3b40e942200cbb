use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ExtractorError, Result};
use crate::types::LinkKind;

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Repository identifier in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse and validate `owner/name`
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || ExtractorError::InvalidRepository(value.to_string());
        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if !is_valid_component(owner) || !is_valid_component(name) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

fn is_valid_component(part: &str) -> bool {
    !part.is_empty()
        && part != "."
        && part != ".."
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

impl FromStr for RepoRef {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Validate a commit identifier: 7 to 64 hex characters
pub fn validate_commit(value: &str) -> Result<String> {
    let commit = value.trim();
    let valid = (7..=64).contains(&commit.len()) && commit.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(commit.to_ascii_lowercase())
    } else {
        Err(ExtractorError::InvalidCommit(value.to_string()))
    }
}

/// Validate an `http(s)://host[:port][/prefix]` server URL, dropping any
/// trailing slash
pub fn validate_server_url(value: &str) -> Result<String> {
    let url = value.trim().trim_end_matches('/');
    let invalid = || ExtractorError::InvalidServerUrl(value.to_string());
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(invalid)?;
    let host = rest.split('/').next().unwrap_or_default();
    let valid = !host.is_empty()
        && !url.contains(char::is_whitespace)
        && !url.contains(['?', '#'])
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '_'));
    if valid {
        Ok(url.to_string())
    } else {
        Err(invalid())
    }
}

/// Build a link for a repository-relative path.
///
/// Paths with a directory get a blob link when both repository and commit are
/// known (`Direct` with a line anchor, `File` without). Everything else gets a
/// code search on the file name, scoped to the repository when known.
#[must_use]
pub fn build_link(
    server_url: &str,
    path: &str,
    line: Option<u32>,
    repo: Option<&RepoRef>,
    commit: Option<&str>,
) -> (String, LinkKind) {
    let server = server_url.trim_end_matches('/');

    if let (true, Some(repo), Some(commit)) = (path.contains('/'), repo, commit) {
        let blob = format!(
            "{server}/{}/{}/blob/{commit}/{}",
            repo.owner,
            repo.name,
            encode(path, false)
        );
        return match line {
            Some(line) => (format!("{blob}#L{line}"), LinkKind::Direct),
            None => (blob, LinkKind::File),
        };
    }

    let file_name = path.rsplit('/').next().unwrap_or(path);
    let query = format!("path:{}&type=code", encode(file_name, true));
    let link = match repo {
        Some(repo) => format!("{server}/{}/{}/search?q={query}", repo.owner, repo.name),
        None => format!("{server}/search?q={query}"),
    };
    (link, LinkKind::Search)
}

/// Percent-encode the few characters that break a URL path or query.
fn encode(value: &str, query: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            '?' => out.push_str("%3F"),
            '&' if query => out.push_str("%26"),
            '+' if query => out.push_str("%2B"),
            '=' if query => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

/// Validated link context shared by every reference of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    server_url: String,
    repo: Option<RepoRef>,
    commit: Option<String>,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            repo: None,
            commit: None,
        }
    }
}

impl LinkBuilder {
    /// Validate identifiers; absent or empty values are not an error.
    pub fn new(server_url: Option<&str>, repo: Option<&str>, commit: Option<&str>) -> Result<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        let server_url = match present(server_url) {
            Some(url) => validate_server_url(url)?,
            None => DEFAULT_SERVER_URL.to_string(),
        };
        let repo = present(repo).map(RepoRef::parse).transpose()?;
        let commit = present(commit).map(validate_commit).transpose()?;

        Ok(Self {
            server_url,
            repo,
            commit,
        })
    }

    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    #[must_use]
    pub fn repo(&self) -> Option<&RepoRef> {
        self.repo.as_ref()
    }

    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    #[must_use]
    pub fn link(&self, path: &str, line: Option<u32>) -> (String, LinkKind) {
        build_link(
            &self.server_url,
            path,
            line,
            self.repo.as_ref(),
            self.commit.as_deref(),
        )
    }
}
