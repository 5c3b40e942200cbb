use once_cell::sync::Lazy;
use regex::Regex;

use crate::markers::is_section_marker;

/// CSI sequences, OSC strings terminated by BEL or ST, and two-byte escapes.
/// `ESC [` and `ESC ]` without a terminator are left alone.
static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b\n]*(?:\x07|\x1b\\)|[@-Z\\^_])")
        .expect("ANSI escape pattern must compile")
});

static LEADING_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}(?:[.,][0-9]+)?(?:Z|[+-][0-9]{2}:?[0-9]{2})?[ \t]?",
    )
    .expect("timestamp pattern must compile")
});

/// Remove terminal escape sequences.
///
/// Runs to a fixed point, so escapes that only become well-formed once an inner
/// sequence is removed are stripped too.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut current = text.to_string();
    while ANSI_ESCAPE.is_match(&current) {
        current = ANSI_ESCAPE.replace_all(&current, "").into_owned();
    }
    current
}

/// Strip every leading ISO-8601 timestamp from a single line.
#[must_use]
pub fn strip_timestamp(line: &str) -> &str {
    let mut rest = line;
    while let Some(found) = LEADING_TIMESTAMP.find(rest) {
        rest = &rest[found.end()..];
    }
    rest
}

/// Apply terminal carriage-return semantics: the last non-empty segment wins.
///
/// Section markers keep their first segment, since GitLab writes the marker
/// before `\r` and a display header after it.
#[must_use]
pub fn resolve_carriage_returns(line: &str) -> &str {
    if !line.contains('\r') {
        return line;
    }

    let first = line.split('\r').next().unwrap_or(line);
    if is_section_marker(first) {
        return first;
    }

    line.rsplit('\r')
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or("")
}

/// Per-line cleanup after escapes are gone.
#[must_use]
pub fn clean_line(line: &str) -> &str {
    let line = strip_timestamp(line);
    let line = resolve_carriage_returns(line);
    strip_timestamp(line)
}
