//! Extraction rule table.
//!
//! Every rule is a single-line regex with a `path` group and optional
//! `line`/`col` groups (numbered variants `line2`, `col2`, ... where a rule
//! has alternative layouts) plus an optional `qual` group for stack frame
//! symbols.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ecosystem::Ecosystem;

/// Unix or Windows path token: optional drive, then path characters.
macro_rules! path_token {
    () => {
        r"(?:/?[A-Za-z]:[\\/])?[\w.@+\-/\\]+"
    };
}

/// Optional directory part followed by a fixed file name.
macro_rules! dir_prefix {
    () => {
        r"(?:/?[A-Za-z]:[\\/])?(?:[\w.@+\-/\\]*[\\/])?"
    };
}

macro_rules! source_ext {
    () => {
        concat!(
            r"(?:py|pyi|pyx|rs|go|[cm]?jsx?|[cm]?tsx?|vue|svelte|java|kt|kts|scala|groovy|gradle",
            r"|cs|fs|vb|php|rb|rake|erb|c|h|cc|cpp|cxx|hpp|hh|hxx|inl|m|mm|cu|swift|dart|ex|exs",
            r"|erl|hs|lua|pl|sh|bash|ps1|sql|proto|tf|ya?ml|json|toml|xml|cmake|mk)"
        )
    };
}

/// Precedence class of a rule; a higher tier wins overlapping spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleTier {
    /// File name mentioned in prose (`from src/app.py`)
    Mention = 1,
    /// `file.ext:line[:col]` in any tool's output
    Generic = 2,
    /// Language- or tool-specific diagnostic and stack-frame formats
    Specific = 3,
}

struct RuleSpec {
    id: &'static str,
    /// `None` infers the ecosystem from the matched path
    ecosystem: Option<Ecosystem>,
    tier: RuleTier,
    pattern: &'static str,
}

const RULE_SPECS: &[RuleSpec] = &[
    RuleSpec {
        id: "python-traceback",
        ecosystem: Some(Ecosystem::Python),
        tier: RuleTier::Specific,
        pattern: r#"File "(?P<path>[^"\n]+)", line (?P<line>\d+)"#,
    },
    RuleSpec {
        id: "python-linter-quoted",
        ecosystem: Some(Ecosystem::Python),
        tier: RuleTier::Specific,
        pattern: concat!(r#"""#, r"(?P<path>", path_token!(), r"\.pyi?)", r#"""#),
    },
    RuleSpec {
        id: "rust-diagnostic",
        ecosystem: Some(Ecosystem::Rust),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"-->[ \t]*(?P<path>",
            path_token!(),
            r"):(?P<line>\d+)(?::(?P<col>\d+))?"
        ),
    },
    RuleSpec {
        id: "rust-panic",
        ecosystem: Some(Ecosystem::Rust),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"panicked at (?:'[^'\n]*',[ \t]*)?(?P<path>",
            path_token!(),
            r"\.rs):(?P<line>\d+)(?::(?P<col>\d+))?"
        ),
    },
    RuleSpec {
        id: "go-test-failure",
        ecosystem: Some(Ecosystem::Go),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?m)^[ \t]+(?P<path>",
            path_token!(),
            r"\.go):(?P<line>\d+):"
        ),
    },
    RuleSpec {
        id: "go-stack-frame",
        ecosystem: Some(Ecosystem::Go),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?m)^[ \t]*(?P<path>",
            path_token!(),
            r"\.go):(?P<line>\d+)[ \t]+\+0x[0-9a-fA-F]+"
        ),
    },
    RuleSpec {
        id: "node-stack-frame",
        ecosystem: Some(Ecosystem::Node),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"\bat[ \t]+(?:[^()\n]*?[ \t]\()?(?P<path>node:[\w.@/\-]+|(?:file://)?",
            path_token!(),
            r"\.(?:[cm]?[jt]sx?|vue|svelte|coffee)):(?P<line>\d+):(?P<col>\d+)\)?"
        ),
    },
    RuleSpec {
        id: "tsc-diagnostic",
        ecosystem: Some(Ecosystem::Node),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            path_token!(),
            r"\.(?:[cm]?tsx?|[cm]?jsx?|vue))\((?P<line>\d+),(?P<col>\d+)\):[ \t]*error[ \t]+TS\d+"
        ),
    },
    RuleSpec {
        id: "webpack-resolve",
        ecosystem: Some(Ecosystem::Node),
        tier: RuleTier::Specific,
        pattern: concat!(r#"Can't resolve ['"](?P<path>"#, path_token!(), r#")['"]"#),
    },
    RuleSpec {
        id: "jest-fail",
        ecosystem: Some(Ecosystem::Node),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?m)^[ \t]*FAIL[ \t]+(?P<path>",
            path_token!(),
            r"\.[cm]?[jt]sx?)\b"
        ),
    },
    RuleSpec {
        id: "jvm-stack-frame",
        ecosystem: Some(Ecosystem::Jvm),
        tier: RuleTier::Specific,
        pattern: r"\bat[ \t]+(?P<qual>[\w$.<>/@\-]+)\((?P<path>[\w$\-]+\.(?:java|kt|kts|scala|groovy)):(?P<line>\d+)\)",
    },
    RuleSpec {
        id: "maven-compiler",
        ecosystem: Some(Ecosystem::Jvm),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"\[ERROR\][ \t]+(?P<path>",
            path_token!(),
            r"\.(?:java|kt|scala|groovy)):\[(?P<line>\d+),(?P<col>\d+)\]"
        ),
    },
    RuleSpec {
        id: "kotlin-diagnostic",
        ecosystem: Some(Ecosystem::Jvm),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?m)^[ \t]*[ew]:[ \t]+(?:file://)?(?P<path>",
            path_token!(),
            r"\.kts?)(?::(?P<line>\d+):(?P<col>\d+)|:?[ \t]*\((?P<line2>\d+),[ \t]*(?P<col2>\d+)\))"
        ),
    },
    RuleSpec {
        id: "msbuild-diagnostic",
        ecosystem: Some(Ecosystem::DotNet),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            path_token!(),
            r"\.(?:cs|fs|vb|csproj|fsproj|vbproj|sln|props|targets|razor|cshtml))",
            r"\((?P<line>\d+)(?:,(?P<col>\d+))?(?:,\d+,\d+)?\):[ \t]*(?:error|warning)[ \t]+[A-Z]+\d+"
        ),
    },
    RuleSpec {
        id: "dotnet-stack-frame",
        ecosystem: Some(Ecosystem::DotNet),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"\bin[ \t]+(?P<path>",
            path_token!(),
            r"\.(?:cs|fs|vb)):line[ \t]+(?P<line>\d+)"
        ),
    },
    RuleSpec {
        id: "php-error",
        ecosystem: Some(Ecosystem::Php),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"\bin[ \t]+(?P<path>",
            path_token!(),
            r"\.(?:php|phtml|inc))(?::[ \t]*|[ \t]+)on[ \t]+line[ \t]+(?P<line>\d+)"
        ),
    },
    RuleSpec {
        id: "php-stack-frame",
        ecosystem: Some(Ecosystem::Php),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?m)^[ \t]*#\d+[ \t]+(?P<path>",
            path_token!(),
            r"\.(?:php|phtml|inc))\((?P<line>\d+)\)"
        ),
    },
    RuleSpec {
        id: "ruby-backtrace",
        ecosystem: Some(Ecosystem::Ruby),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            path_token!(),
            r"\.(?:rb|rake|erb|gemspec|ru)):(?P<line>\d+):in[ \t]"
        ),
    },
    RuleSpec {
        id: "rspec-rerun",
        ecosystem: Some(Ecosystem::Ruby),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?m)^[ \t]*rspec[ \t]+(?P<path>",
            path_token!(),
            r"\.rb):(?P<line>\d+)"
        ),
    },
    RuleSpec {
        id: "gcc-diagnostic",
        ecosystem: Some(Ecosystem::Native),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            path_token!(),
            r"\.(?:c|h|cc|cpp|cxx|c\+\+|hpp|hh|hxx|inl|ipp|m|mm|cu|cuh)):(?P<line>\d+):",
            r"(?:(?P<col>\d+):)?[ \t]*(?:fatal[ \t]+)?(?:error|warning|note)\b"
        ),
    },
    RuleSpec {
        id: "msvc-diagnostic",
        ecosystem: Some(Ecosystem::Native),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            path_token!(),
            r"\.(?:c|h|cc|cpp|cxx|hpp|hh|hxx|inl|ipp))\((?P<line>\d+)(?:,(?P<col>\d+))?\)",
            r"[ \t]*:[ \t]*(?:fatal[ \t]+)?(?:error|warning)[ \t]+C\d+"
        ),
    },
    RuleSpec {
        id: "dockerfile",
        ecosystem: Some(Ecosystem::Docker),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            dir_prefix!(),
            r"Dockerfile(?:\.[\w\-]+)*):(?P<line>\d+)"
        ),
    },
    RuleSpec {
        id: "cmake-error",
        ecosystem: Some(Ecosystem::Make),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"CMake (?:Error|Warning)(?:[ \t]+\(dev\))?[ \t]+at[ \t]+(?P<path>",
            path_token!(),
            r"):(?P<line>\d+)"
        ),
    },
    RuleSpec {
        id: "build-file",
        ecosystem: None,
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>",
            dir_prefix!(),
            r"(?:GNUmakefile|Makefile|makefile|CMakeLists\.txt|Gemfile|Rakefile|Jenkinsfile|Vagrantfile|Justfile|justfile)",
            r"):(?P<line>\d+)"
        ),
    },
    RuleSpec {
        id: "workflow-file",
        ecosystem: Some(Ecosystem::GithubActions),
        tier: RuleTier::Specific,
        pattern: concat!(
            r"(?P<path>(?:[\w.@+\-/\\]*[\\/])?\.github[\\/]workflows[\\/][\w.\-]+\.ya?ml)",
            r"(?:#L(?P<line>\d+)|:(?P<line2>\d+)(?::(?P<col2>\d+))?",
            r"|[ \t]*\(Line:[ \t]*(?P<line3>\d+),[ \t]*Col:[ \t]*(?P<col3>\d+)\))?"
        ),
    },
    RuleSpec {
        id: "generic-file-line",
        ecosystem: None,
        tier: RuleTier::Generic,
        pattern: concat!(
            r"(?P<path>",
            path_token!(),
            r"\.",
            source_ext!(),
            r"):(?P<line>\d+)(?::(?P<col>\d+))?"
        ),
    },
    RuleSpec {
        id: "mention-source-file",
        ecosystem: None,
        tier: RuleTier::Mention,
        pattern: concat!(
            r#"\b(?:checking|in|file|from|import)[ \t]+['"`]?(?P<path>"#,
            path_token!(),
            r"\.(?:py|js|ts|tsx|jsx|go|rs|rb|java|kt|cs|php|swift|c|cpp|h|hpp))\b"
        ),
    },
];

/// A compiled extraction rule
#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub ecosystem: Option<Ecosystem>,
    pub tier: RuleTier,
    /// Tier first, then table order
    pub priority: u32,
    regex: Regex,
}

impl Rule {
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let count = RULE_SPECS.len() as u32;
    RULE_SPECS
        .iter()
        .enumerate()
        .map(|(index, spec)| Rule {
            id: spec.id,
            ecosystem: spec.ecosystem,
            tier: spec.tier,
            priority: spec.tier as u32 * 1000 + (count - index as u32),
            regex: Regex::new(spec.pattern)
                .unwrap_or_else(|err| panic!("rule {} must compile: {err}", spec.id)),
        })
        .collect()
});

/// The process-wide rule table, in precedence order within each tier.
pub fn rules() -> &'static [Rule] {
    &RULES
}
