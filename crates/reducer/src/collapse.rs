fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Keep at most `max_run` consecutive blank lines.
pub fn squash_blank_runs(lines: Vec<String>, max_run: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut blank_run = 0usize;

    for line in lines {
        if is_blank(&line) {
            blank_run += 1;
            if blank_run <= max_run {
                out.push(line);
            }
        } else {
            blank_run = 0;
            out.push(line);
        }
    }

    out
}

/// Collapse runs of identical non-blank lines into `line (repeated N times)`.
///
/// Runs shorter than `threshold` are emitted unchanged. Collapsing is repeated
/// until no run reaches the threshold, so the output is a fixed point.
pub fn collapse_repeats(mut lines: Vec<String>, threshold: usize) -> Vec<String> {
    loop {
        let before = lines.len();
        lines = collapse_once(lines, threshold);
        if lines.len() == before {
            return lines;
        }
    }
}

fn collapse_once(lines: Vec<String>, threshold: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(line) = iter.next() {
        let mut count = 1usize;
        while iter.peek().is_some_and(|next| *next == line) {
            iter.next();
            count += 1;
        }

        if count >= threshold && !is_blank(&line) {
            out.push(format!("{line} (repeated {count} times)"));
        } else {
            out.extend(std::iter::repeat(line).take(count));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| (*l).to_string()).collect()
    }

    #[test]
    fn test_collapse_repeated_lines() {
        let lines = owned(&[
            "line 1", "line 2", "line 2", "line 3", "line 3", "line 3", "line 3", "line 4",
        ]);
        assert_eq!(
            collapse_repeats(lines, 3),
            owned(&["line 1", "line 2", "line 2", "line 3 (repeated 4 times)", "line 4"])
        );
    }

    #[test]
    fn test_collapse_exactly_threshold() {
        let lines = owned(&["warning", "warning", "warning"]);
        assert_eq!(
            collapse_repeats(lines, 3),
            owned(&["warning (repeated 3 times)"])
        );
    }

    #[test]
    fn test_collapse_below_threshold() {
        let lines = owned(&["line", "line", "other"]);
        assert_eq!(collapse_repeats(lines, 3), owned(&["line", "line", "other"]));
    }

    #[test]
    fn test_collapse_leaves_blank_runs_to_squash() {
        let lines = owned(&["a", "", "", "", "b"]);
        assert_eq!(collapse_repeats(lines.clone(), 3), lines);
    }

    #[test]
    fn test_collapse_reaches_fixed_point() {
        let lines = owned(&[
            "a (repeated 3 times)",
            "a (repeated 3 times)",
            "a",
            "a",
            "a",
        ]);
        assert_eq!(
            collapse_repeats(lines, 3),
            owned(&["a (repeated 3 times) (repeated 3 times)"])
        );
    }

    #[test]
    fn test_squash_blank_runs() {
        let lines = owned(&["line 1", "", "", "", "", "line 2", "", "line 3"]);
        assert_eq!(
            squash_blank_runs(lines, 2),
            owned(&["line 1", "", "", "line 2", "", "line 3"])
        );
    }

    #[test]
    fn test_squash_treats_whitespace_as_blank() {
        let lines = owned(&["a", "  ", "\t", "b"]);
        assert_eq!(squash_blank_runs(lines, 1), owned(&["a", "  ", "b"]));
    }
}
