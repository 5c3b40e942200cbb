use serde::{Deserialize, Serialize};

use crate::ecosystem::Ecosystem;

/// A working-directory announcement found in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAnchor {
    pub ecosystem: Ecosystem,

    /// Announced root; an empty root means the repository root
    pub root: String,

    /// Byte offset of the start of the announcing line
    pub position: usize,
}

/// Result of path normalization
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedPath {
    /// `/`-separated path
    pub path: String,

    /// A CI workspace prefix was stripped, so `path` is relative to the repository root
    pub repo_rooted: bool,

    /// `path` is still absolute (outside any known workspace)
    pub absolute: bool,
}

/// A raw file reference produced by a matching rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub raw_token: String,

    /// 1-indexed line, if the reference carried one
    pub line: Option<u32>,

    /// 1-indexed column, if the reference carried one
    pub column: Option<u32>,

    /// Byte span of the whole match in the scanned text
    pub span_start: usize,
    pub span_end: usize,

    pub rule_id: &'static str,
    pub ecosystem: Ecosystem,
    pub priority: u32,

    /// Enclosing symbol of a stack frame (e.g. `org.junit.Assert.fail`)
    pub qualifier: Option<String>,

    pub normalized: Option<NormalizedPath>,
    pub resolved_path: Option<String>,
}

impl Candidate {
    /// Most processed form of the path available
    #[must_use]
    pub fn path(&self) -> &str {
        self.resolved_path
            .as_deref()
            .or(self.normalized.as_ref().map(|n| n.path.as_str()))
            .unwrap_or(&self.raw_token)
    }

    #[must_use]
    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.span_start < other.span_end && other.span_start < self.span_end
    }
}

/// How a link points at the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Blob link anchored at a line
    Direct,
    /// Blob link without a line anchor
    File,
    /// Code search keyed on the file name
    Search,
}

/// A deduplicated source file reference with a navigable link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedFile {
    /// Repository-relative, `/`-separated path
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    pub link: String,
    pub link_kind: LinkKind,
    pub ecosystem: Ecosystem,
}

impl AffectedFile {
    /// `path:line`, or just `path` when the line is unknown
    #[must_use]
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.path),
            None => self.path.clone(),
        }
    }

    /// Whether only the file name is known
    #[must_use]
    pub fn is_bare_file_name(&self) -> bool {
        !self.path.contains('/')
    }
}
