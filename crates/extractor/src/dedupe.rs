use std::collections::HashSet;

use crate::types::Candidate;

/// Collapse candidates that refer to the same `(path, line)`.
///
/// The first occurrence wins, including its column; a missing line is its own
/// key. Input order is preserved.
#[must_use]
pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<(String, Option<u32>)> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.path().to_string(), c.line)))
        .collect()
}
