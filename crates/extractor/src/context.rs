use once_cell::sync::Lazy;
use regex::Regex;

use crate::ecosystem::Ecosystem;
use crate::types::{Candidate, ContextAnchor};

/// Build-tool lines announcing the directory later relative paths are based on.
static ANCHOR_RULES: Lazy<Vec<(Ecosystem, Regex)>> = Lazy::new(|| {
    [
        // Cargo: `Compiling app v0.1.0 (/path/app)` or `Compiling app at /path/app`
        (
            Ecosystem::Rust,
            r"(?m)^[ \t]*(?:Compiling|Checking|Documenting)[ \t]+[\w\-]+[ \t]+(?:v[0-9][\w.+\-]*[ \t]+\((?P<path>[^)\n]+)\)|at[ \t]+(?P<path2>[^\n]*[^\s]))",
        ),
        // pytest session header
        (Ecosystem::Python, r"(?m)^rootdir:[ \t]*(?P<path>[^,\n]*[^,\s])"),
        // GNU make recursion
        (
            Ecosystem::Native,
            r#"(?m)^[\w.\-]*make(?:\[\d+\])?:[ \t]+Entering directory[ \t]+[`'"](?P<path>[^'"`\n]+)['"`]"#,
        ),
        // npm lifecycle header: `> pkg@1.0.0 test /path/pkg`
        (
            Ecosystem::Node,
            r"(?m)^>[ \t]+(?:@[\w.\-]+/)?[\w.\-]+@[\w.+\-]+[ \t]+[\w:.\-]+[ \t]+(?P<path>(?:/|[A-Za-z]:[\\/])[^\n]*[^\s])",
        ),
    ]
    .into_iter()
    .map(|(ecosystem, pattern)| {
        let regex = Regex::new(pattern).expect("anchor pattern must compile");
        (ecosystem, regex)
    })
    .collect()
});

/// Find working-directory anchors, ordered by position.
///
/// Roots are only trimmed of quotes and trailing separators here.
#[must_use]
pub fn find_contexts(text: &str) -> Vec<ContextAnchor> {
    let mut anchors = Vec::new();

    for (ecosystem, regex) in ANCHOR_RULES.iter() {
        for caps in regex.captures_iter(text) {
            let Some(path) = caps.name("path").or_else(|| caps.name("path2")) else {
                continue;
            };
            let root = trim_root(path.as_str());
            if root.is_empty() {
                continue;
            }
            let position = text[..path.start()].rfind('\n').map_or(0, |idx| idx + 1);
            anchors.push(ContextAnchor {
                ecosystem: *ecosystem,
                root: root.to_string(),
                position,
            });
        }
    }

    anchors.sort_by_key(|anchor| anchor.position);
    anchors
}

fn trim_root(raw: &str) -> &str {
    let root = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`');
    let trimmed = root.trim_end_matches(|c| c == '/' || c == '\\');
    if trimmed.is_empty() {
        root
    } else {
        trimmed
    }
}

/// Prefix a relative candidate path with the root of the nearest preceding
/// anchor of the same ecosystem.
///
/// Repo-rooted, absolute and parent-relative paths are returned unchanged, as
/// is any path with no applicable anchor. `anchors` must be sorted by
/// position.
#[must_use]
pub fn resolve(candidate: &Candidate, anchors: &[ContextAnchor]) -> String {
    let Some(normalized) = candidate.normalized.as_ref() else {
        return candidate.raw_token.clone();
    };
    let path = normalized.path.as_str();
    if normalized.repo_rooted || normalized.absolute || path.is_empty() || path.starts_with("../")
    {
        return path.to_string();
    }

    let anchor = anchors
        .iter()
        .rev()
        .find(|a| a.ecosystem == candidate.ecosystem && a.position <= candidate.span_start);

    match anchor {
        Some(anchor) if !anchor.root.is_empty() => join_root(&anchor.root, path),
        _ => path.to_string(),
    }
}

fn join_root(root: &str, path: &str) -> String {
    let root = root.trim_matches('/');
    if root.is_empty() || path == root || path.starts_with(&format!("{root}/")) {
        return path.to_string();
    }
    format!("{root}/{}", path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NormalizedPath;
    use pretty_assertions::assert_eq;

    fn candidate(path: &str, ecosystem: Ecosystem, span_start: usize) -> Candidate {
        Candidate {
            raw_token: path.to_string(),
            line: Some(1),
            column: None,
            span_start,
            span_end: span_start + path.len(),
            rule_id: "test",
            ecosystem,
            priority: 0,
            qualifier: None,
            normalized: Some(NormalizedPath {
                path: path.to_string(),
                repo_rooted: false,
                absolute: path.starts_with('/'),
            }),
            resolved_path: None,
        }
    }

    fn anchor(ecosystem: Ecosystem, root: &str, position: usize) -> ContextAnchor {
        ContextAnchor {
            ecosystem,
            root: root.to_string(),
            position,
        }
    }

    #[test]
    fn test_find_cargo_anchors() {
        let log = "   Compiling serde v1.0.200\n   Compiling rust-app v0.1.0 (/home/runner/work/r/r/rust-app)\n   Compiling unit at /repo/crate-x/\n";
        let anchors = find_contexts(log);
        assert_eq!(
            anchors,
            vec![
                anchor(Ecosystem::Rust, "/home/runner/work/r/r/rust-app", 28),
                anchor(Ecosystem::Rust, "/repo/crate-x", 90),
            ]
        );
    }

    #[test]
    fn test_find_other_anchors() {
        let log = "rootdir: /home/runner/work/r/r/backend, configfile: pytest.ini\nmake[1]: Entering directory '/src/build/lib'\n> web@1.0.0 test /home/runner/work/r/r/web\n";
        let found: Vec<(Ecosystem, String)> = find_contexts(log)
            .into_iter()
            .map(|a| (a.ecosystem, a.root))
            .collect();
        assert_eq!(
            found,
            vec![
                (Ecosystem::Python, "/home/runner/work/r/r/backend".to_string()),
                (Ecosystem::Native, "/src/build/lib".to_string()),
                (Ecosystem::Node, "/home/runner/work/r/r/web".to_string()),
            ]
        );
    }

    #[test]
    fn test_npm7_header_without_path_is_ignored() {
        assert!(find_contexts("> web@1.0.0 test\n> jest\n").is_empty());
    }

    #[test]
    fn test_resolve_uses_nearest_preceding_anchor() {
        let anchors = vec![
            anchor(Ecosystem::Rust, "first", 0),
            anchor(Ecosystem::Python, "py", 5),
            anchor(Ecosystem::Rust, "second", 10),
            anchor(Ecosystem::Rust, "third", 50),
        ];

        let c = candidate("src/lib.rs", Ecosystem::Rust, 20);
        assert_eq!(resolve(&c, &anchors), "second/src/lib.rs");

        let c = candidate("src/lib.rs", Ecosystem::Rust, 10);
        assert_eq!(resolve(&c, &anchors), "second/src/lib.rs");

        let c = candidate("src/lib.rs", Ecosystem::Go, 20);
        assert_eq!(resolve(&c, &anchors), "src/lib.rs");
    }

    #[test]
    fn test_resolve_leaves_rooted_paths() {
        let anchors = vec![anchor(Ecosystem::Rust, "crate-x", 0)];

        let mut c = candidate("src/lib.rs", Ecosystem::Rust, 5);
        if let Some(n) = c.normalized.as_mut() {
            n.repo_rooted = true;
        }
        assert_eq!(resolve(&c, &anchors), "src/lib.rs");

        let c = candidate("/tmp/x.rs", Ecosystem::Rust, 5);
        assert_eq!(resolve(&c, &anchors), "/tmp/x.rs");

        let c = candidate("crate-x/src/lib.rs", Ecosystem::Rust, 5);
        assert_eq!(resolve(&c, &anchors), "crate-x/src/lib.rs");
    }

    #[test]
    fn test_resolve_with_repo_root_anchor() {
        let anchors = vec![anchor(Ecosystem::Rust, "", 0)];
        let c = candidate("src/lib.rs", Ecosystem::Rust, 5);
        assert_eq!(resolve(&c, &anchors), "src/lib.rs");
    }
}
