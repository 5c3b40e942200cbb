//! # Failtrace Extractor
//!
//! Lexical extraction of source file references from CI log text, across
//! Python, Rust, Go, Node/TypeScript, JVM, .NET, PHP, Ruby, C/C++, Swift and
//! build-file formats.
//!
//! ## Architecture
//!
//! ```text
//! Log text ──┬──> Context tracker   (Compiling ... (/root), rootdir:, make: Entering directory)
//!            │         │
//!            └──> Pattern matcher   (per-ecosystem rules, overlap resolution by priority)
//!                      │
//!                      ├─> Path normalizer   (separators, drive letters, CI workspace roots)
//!                      ├─> Context resolver  (nearest preceding anchor of the same ecosystem)
//!                      ├─> Library filter    (stdlib, toolchain, vendored packages)
//!                      ├─> Deduplicator      (first occurrence of each (path, line))
//!                      └─> Link builder      (blob link or code search)
//! ```
//!
//! Extraction is best-effort: text that matches no rule is skipped, never an
//! error. Only invalid configuration and invalid repository identifiers fail.
//!
//! ## Example
//!
//! ```rust
//! use failtrace_extractor::{Extractor, LinkBuilder, LinkKind};
//!
//! let links = LinkBuilder::new(None, Some("octo/app"), Some("abc1234")).unwrap();
//! let files = Extractor::default().extract(
//!     "  File \"/home/runner/work/app/app/src/calc.py\", line 42, in add",
//!     &links,
//! );
//!
//! assert_eq!(files[0].path, "src/calc.py");
//! assert_eq!(files[0].link_kind, LinkKind::Direct);
//! assert_eq!(
//!     files[0].link,
//!     "https://github.com/octo/app/blob/abc1234/src/calc.py#L42"
//! );
//! ```

mod config;
mod context;
mod dedupe;
mod ecosystem;
mod engine;
mod error;
mod filter;
mod links;
mod matcher;
mod normalize;
mod rules;
mod types;

pub use config::ExtractorConfig;
pub use context::{find_contexts, resolve};
pub use dedupe::dedupe;
pub use ecosystem::Ecosystem;
pub use engine::{extract_affected_files, Extractor};
pub use error::{ExtractorError, Result};
pub use filter::{is_library_frame, is_library_path, is_plausible_path};
pub use links::{
    build_link, validate_commit, validate_server_url, LinkBuilder, RepoRef, DEFAULT_SERVER_URL,
};
pub use matcher::{match_text, resolve_overlaps};
pub use normalize::{repo_relative, PathNormalizer, PlatformHint};
pub use rules::{rules, Rule, RuleTier};
pub use types::{AffectedFile, Candidate, ContextAnchor, LinkKind, NormalizedPath};
