use once_cell::sync::Lazy;
use regex::Regex;

/// CI directives that carry no diagnostic value once the log is flattened.
/// Error directives (`##[error]`, `::error`) are deliberately absent.
const METADATA_PREFIXES: &[&str] = &[
    // GitHub Actions log formatting.
    "##[group]",
    "##[endgroup]",
    "##[command]",
    "##[debug]",
    // GitHub Actions workflow commands.
    "::group::",
    "::endgroup::",
    "::set-output",
    "::debug",
    "::notice",
    "::warning",
    "::add-mask::",
    "::add-matcher::",
    "::remove-matcher",
    "::save-state",
    "::stop-commands::",
    // Travis CI folds and timers.
    "travis_fold:",
    "travis_time:",
];

static FAILURE_SIGNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"AssertionError",
        r"|(?i:error)(?::|\[)",
        r"|\berror [A-Z]{2,}[0-9]+",
        r"|\bERROR\b",
        r"|\bFAIL(?:ED|URE)?\b",
        r"|panicked at",
        r"|Traceback \(most recent call last\)",
        r"|Exception\b",
        r"|npm ERR!",
        r"|##\[error\]",
        r"|::error",
        r"|\bfatal:",
        r"|exit code [1-9][0-9]*",
    ))
    .expect("failure signal pattern must compile")
});

/// Boundary of a named CI section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMarker<'a> {
    Start(&'a str),
    End(&'a str),
}

/// Whether the line is a CI formatting/metadata directive.
#[must_use]
pub fn is_metadata_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    METADATA_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Whether the line carries a known assertion or error marker.
#[must_use]
pub fn is_failure_signal(line: &str) -> bool {
    FAILURE_SIGNAL.is_match(line)
}

/// Parse Azure Pipelines (`##[section]Starting: X`) and GitLab
/// (`section_start:TS:NAME`) section boundaries.
#[must_use]
pub fn parse_section_marker(line: &str) -> Option<SectionMarker<'_>> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("##[section]") {
        if let Some(name) = rest.strip_prefix("Starting:") {
            return Some(SectionMarker::Start(name.trim()));
        }
        if let Some(name) = rest.strip_prefix("Finishing:") {
            return Some(SectionMarker::End(name.trim()));
        }
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("section_start:") {
        return gitlab_section_name(rest).map(SectionMarker::Start);
    }
    if let Some(rest) = trimmed.strip_prefix("section_end:") {
        return gitlab_section_name(rest).map(SectionMarker::End);
    }

    None
}

pub(crate) fn is_section_marker(line: &str) -> bool {
    parse_section_marker(line).is_some()
}

/// `TIMESTAMP:NAME[options]` -> `NAME`
fn gitlab_section_name(rest: &str) -> Option<&str> {
    let (timestamp, name) = rest.split_once(':')?;
    if timestamp.is_empty() || !timestamp.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let name = name.split('[').next().unwrap_or(name).trim();
    if name.is_empty() {
        return None;
    }
    Some(name)
}
