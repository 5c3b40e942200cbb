use crate::config::ExtractorConfig;
use crate::context::{find_contexts, resolve};
use crate::dedupe::dedupe;
use crate::error::{ExtractorError, Result};
use crate::filter::{is_library_frame, is_library_path, is_plausible_path};
use crate::links::LinkBuilder;
use crate::matcher::match_text;
use crate::normalize::{repo_relative, PathNormalizer, PlatformHint};
use crate::types::{AffectedFile, Candidate};

/// Extraction engine: context tracking, matching, normalization, resolution
/// and filtering over one log text.
///
/// Holds no per-run state, so a single instance can serve many logs and
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
    normalizer: PathNormalizer,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config
            .validate()
            .map_err(ExtractorError::invalid_config)?;
        let normalizer = PathNormalizer::new(&config.extra_workspace_prefixes);
        Ok(Self { config, normalizer })
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Surviving candidates in log order, with `resolved_path` set to the
    /// repository-relative path. Not yet deduplicated.
    #[must_use]
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut anchors = find_contexts(text);
        for anchor in &mut anchors {
            anchor.root = self.normalizer.normalize_root(&anchor.root);
        }

        let matched = match_text(text);
        let matched_count = matched.len();
        let mut dropped_libraries = 0usize;

        let mut kept = Vec::with_capacity(matched.len());
        for mut candidate in matched {
            let hint = PlatformHint::detect(&candidate.raw_token);
            candidate.normalized = Some(self.normalizer.normalize(&candidate.raw_token, hint));
            let resolved = resolve(&candidate, &anchors);

            if self.config.filter_libraries && self.is_library(&candidate, &resolved) {
                dropped_libraries += 1;
                continue;
            }

            let path = repo_relative(&resolved);
            if !is_plausible_path(&path, self.config.min_path_len, self.config.max_path_len) {
                log::trace!("rejected implausible path {path:?} from {}", candidate.rule_id);
                continue;
            }
            candidate.resolved_path = Some(path);
            kept.push(candidate);
        }

        log::debug!(
            "{} anchors, {matched_count} candidates, {dropped_libraries} library references dropped, {} kept",
            anchors.len(),
            kept.len()
        );
        kept
    }

    fn is_library(&self, candidate: &Candidate, resolved: &str) -> bool {
        is_library_path(resolved, candidate.ecosystem)
            || candidate
                .qualifier
                .as_deref()
                .is_some_and(is_library_frame)
    }

    /// Deduplicated affected files in first-occurrence order, each with a link.
    #[must_use]
    pub fn extract(&self, text: &str, links: &LinkBuilder) -> Vec<AffectedFile> {
        let mut unique = dedupe(self.candidates(text));
        if let Some(max) = self.config.max_files {
            unique.truncate(max);
        }

        unique
            .into_iter()
            .map(|candidate| {
                let path = candidate.path().to_string();
                let (link, link_kind) = links.link(&path, candidate.line);
                AffectedFile {
                    path,
                    line: candidate.line,
                    column: candidate.column,
                    link,
                    link_kind,
                    ecosystem: candidate.ecosystem,
                }
            })
            .collect()
    }
}

/// Extract with the default configuration.
#[must_use]
pub fn extract_affected_files(text: &str, links: &LinkBuilder) -> Vec<AffectedFile> {
    Extractor::default().extract(text, links)
}
