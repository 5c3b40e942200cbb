use regex::Captures;
use std::collections::BTreeMap;

use crate::ecosystem::Ecosystem;
use crate::rules::{rules, Rule};
use crate::types::Candidate;

const LINE_GROUPS: [&str; 3] = ["line", "line2", "line3"];
const COLUMN_GROUPS: [&str; 3] = ["col", "col2", "col3"];

/// Run every rule over `text` and keep the highest-priority match for each
/// overlapping span. Output is ordered by position.
#[must_use]
pub fn match_text(text: &str) -> Vec<Candidate> {
    let mut found = Vec::new();
    for rule in rules() {
        found.extend(
            rule.regex()
                .captures_iter(text)
                .filter_map(|caps| build_candidate(rule, &caps)),
        );
    }

    let total = found.len();
    let kept = resolve_overlaps(found);
    log::debug!("matched {total} raw references, {} after overlap resolution", kept.len());
    kept
}

fn build_candidate(rule: &Rule, caps: &Captures<'_>) -> Option<Candidate> {
    let whole = caps.get(0)?;
    let token = caps.name("path")?.as_str().trim();
    // `scheme://host` fragments are not files.
    if token.is_empty() || token.starts_with("//") {
        return None;
    }

    let ecosystem = rule
        .ecosystem
        .unwrap_or_else(|| Ecosystem::from_path(&token.replace('\\', "/")));

    Some(Candidate {
        raw_token: token.to_string(),
        line: first_number(caps, &LINE_GROUPS),
        column: first_number(caps, &COLUMN_GROUPS),
        span_start: whole.start(),
        span_end: whole.end(),
        rule_id: rule.id,
        ecosystem,
        priority: rule.priority,
        qualifier: caps.name("qual").map(|q| q.as_str().to_string()),
        normalized: None,
        resolved_path: None,
    })
}

/// Positive number from the first group present; `0` counts as absent.
fn first_number(caps: &Captures<'_>, groups: &[&str]) -> Option<u32> {
    groups
        .iter()
        .find_map(|name| caps.name(name))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n >= 1)
}

/// Keep non-overlapping candidates, preferring higher priority, then the
/// earlier and longer span.
#[must_use]
pub fn resolve_overlaps(mut found: Vec<Candidate>) -> Vec<Candidate> {
    found.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.span_start.cmp(&b.span_start))
            .then(b.span_end.cmp(&a.span_end))
    });

    // Kept spans are disjoint, so only the closest one starting before a
    // candidate's end can overlap it.
    let mut taken: BTreeMap<usize, usize> = BTreeMap::new();
    let mut kept = Vec::with_capacity(found.len());
    for candidate in found {
        let clash = taken
            .range(..candidate.span_end)
            .next_back()
            .is_some_and(|(_, &end)| end > candidate.span_start);
        if clash {
            continue;
        }
        taken.insert(candidate.span_start, candidate.span_end);
        kept.push(candidate);
    }

    kept.sort_by_key(|c| c.span_start);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(text: &str) -> Vec<(&'static str, String, Option<u32>, Option<u32>)> {
        match_text(text)
            .into_iter()
            .map(|c| (c.rule_id, c.raw_token, c.line, c.column))
            .collect()
    }

    #[test]
    fn test_python_traceback() {
        let log = "  File \"src/main.py\", line 42, in main\n  File \"src/processor.py\", line 15, in process_data";
        assert_eq!(
            summary(log),
            vec![
                ("python-traceback", "src/main.py".to_string(), Some(42), None),
                ("python-traceback", "src/processor.py".to_string(), Some(15), None),
            ]
        );
    }

    #[test]
    fn test_rust_diagnostic_beats_generic() {
        let log = "error[E0425]: cannot find value `x`\n --> src/main.rs:4:13";
        assert_eq!(
            summary(log),
            vec![("rust-diagnostic", "src/main.rs".to_string(), Some(4), Some(13))]
        );
    }

    #[test]
    fn test_rust_panic_forms() {
        let modern = summary("thread 'main' panicked at src/main.rs:5:9:\nboom");
        assert_eq!(modern[0].0, "rust-panic");
        assert_eq!(modern[0].2, Some(5));

        let legacy = summary("thread 'main' panicked at 'boom', src/lib.rs:7:3");
        assert_eq!(legacy[0].0, "rust-panic");
        assert_eq!(legacy[0].1, "src/lib.rs");
    }

    #[test]
    fn test_go_formats() {
        let log = "--- FAIL: TestAdd (0.00s)\n    math_test.go:7: expected 2, got 3\n\t/home/runner/work/r/r/pkg/add.go:12 +0x1d";
        let found = summary(log);
        assert_eq!(found[0], ("go-test-failure", "math_test.go".to_string(), Some(7), None));
        assert_eq!(found[1].0, "go-stack-frame");
        assert_eq!(found[1].2, Some(12));
    }

    #[test]
    fn test_node_stack_frames() {
        let log = "    at Function.Module._resolveFilename (node:internal/modules/cjs/loader.js:933:15)\n    at src/app.js:45:10\n    at Object.<anonymous> (file:///home/u/app/lib/server.mjs:3:7)";
        let found = summary(log);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|f| f.0 == "node-stack-frame"));
        assert_eq!(found[0].1, "node:internal/modules/cjs/loader.js");
        assert_eq!(found[1], ("node-stack-frame", "src/app.js".to_string(), Some(45), Some(10)));
        assert_eq!(found[2].1, "file:///home/u/app/lib/server.mjs");
    }

    #[test]
    fn test_jvm_frame_qualifier() {
        let found = match_text("\tat java.base/java.lang.Thread.run(Thread.java:833)");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule_id, "jvm-stack-frame");
        assert_eq!(
            found[0].qualifier.as_deref(),
            Some("java.base/java.lang.Thread.run")
        );
        assert_eq!(found[0].raw_token, "Thread.java");
    }

    #[test]
    fn test_kotlin_diagnostic_layouts() {
        let found = summary("e: file:///src/main/kotlin/App.kt:10:5 Unresolved reference\ne: /src/App.kt: (3, 9): Type mismatch");
        assert_eq!(found[0], ("kotlin-diagnostic", "/src/main/kotlin/App.kt".to_string(), Some(10), Some(5)));
        assert_eq!(found[1], ("kotlin-diagnostic", "/src/App.kt".to_string(), Some(3), Some(9)));
    }

    #[test]
    fn test_dotnet_formats() {
        let log = r"D:\a\app\app\src\Program.cs(10,31): error CS0103: The name 'x' does not exist
   at App.Main() in D:\a\app\app\src\Program.cs:line 12";
        let found = summary(log);
        assert_eq!(found[0].0, "msbuild-diagnostic");
        assert_eq!(found[0].1, r"D:\a\app\app\src\Program.cs");
        assert_eq!((found[0].2, found[0].3), (Some(10), Some(31)));
        assert_eq!(found[1].0, "dotnet-stack-frame");
        assert_eq!(found[1].2, Some(12));
    }

    #[test]
    fn test_php_ruby_native() {
        let log = "PHP Fatal error:  Uncaught Error in /app/src/Foo.php on line 4
#0 /app/src/Bar.php(25): Foo->run()
app/models/user.rb:12:in `save'
rspec ./spec/models/user_spec.rb:8 # User is valid
main.c:10:5: error: expected ';'
src\\util.cpp(22): error C2065: 'x': undeclared identifier";
        let ids: Vec<&str> = match_text(log).iter().map(|c| c.rule_id).collect();
        assert_eq!(
            ids,
            vec![
                "php-error",
                "php-stack-frame",
                "ruby-backtrace",
                "rspec-rerun",
                "gcc-diagnostic",
                "msvc-diagnostic",
            ]
        );
    }

    #[test]
    fn test_build_files() {
        let log = "Dockerfile.dev:12: warning\nmake: *** [Makefile:12: all] Error 2\nCMake Error at CMakeLists.txt:20 (find_package):\n.github/workflows/ci.yml#L7";
        let found = summary(log);
        assert_eq!(found[0], ("dockerfile", "Dockerfile.dev".to_string(), Some(12), None));
        assert_eq!(found[1], ("build-file", "Makefile".to_string(), Some(12), None));
        assert_eq!(found[2], ("cmake-error", "CMakeLists.txt".to_string(), Some(20), None));
        assert_eq!(found[3], ("workflow-file", ".github/workflows/ci.yml".to_string(), Some(7), None));
    }

    #[test]
    fn test_generic_infers_ecosystem() {
        let found = match_text("src/types.py:1: error: Module shadows stdlib");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule_id, "generic-file-line");
        assert_eq!(found[0].ecosystem, Ecosystem::Python);
    }

    #[test]
    fn test_mentions_lose_to_line_references() {
        let found = summary("checking src/main.py\nerror in src/lib.rs:3");
        assert_eq!(
            found,
            vec![
                ("mention-source-file", "src/main.py".to_string(), None, None),
                ("generic-file-line", "src/lib.rs".to_string(), Some(3), None),
            ]
        );
    }

    #[test]
    fn test_zero_line_is_absent() {
        let found = match_text("src/a.py:0: note");
        assert_eq!(found[0].line, None);
    }

    #[test]
    fn test_urls_and_versions_ignored() {
        assert!(match_text("GET https://registry.npmjs.org:443/left-pad").is_empty());
        assert!(match_text("node v18.17.1:3 started at 10:00:00").is_empty());
    }

    #[test]
    fn test_resolve_overlaps_prefers_priority() {
        let base = Candidate {
            raw_token: "a".to_string(),
            line: None,
            column: None,
            span_start: 0,
            span_end: 10,
            rule_id: "low",
            ecosystem: Ecosystem::Generic,
            priority: 1,
            qualifier: None,
            normalized: None,
            resolved_path: None,
        };
        let high = Candidate {
            span_start: 5,
            span_end: 20,
            rule_id: "high",
            priority: 9,
            ..base.clone()
        };
        let later = Candidate {
            span_start: 20,
            span_end: 25,
            rule_id: "later",
            ..base.clone()
        };

        let kept: Vec<&str> = resolve_overlaps(vec![base, high, later])
            .iter()
            .map(|c| c.rule_id)
            .collect();
        assert_eq!(kept, vec!["high", "later"]);
    }
}
