use crate::ecosystem::Ecosystem;

/// One denylist entry, matched against a `/`-separated path
#[derive(Debug, Clone, Copy)]
enum Deny {
    Prefix(&'static str),
    /// A whole path segment (`node_modules` matches `a/node_modules/b`)
    Segment(&'static str),
    Contains(&'static str),
    FileName(&'static str),
    /// `parent` segment followed by `name` plus a version (`lib/python3.12`)
    Versioned {
        parent: &'static str,
        name: &'static str,
    },
}

impl Deny {
    fn matches(self, path: &str) -> bool {
        match self {
            Deny::Prefix(prefix) => path.starts_with(prefix),
            Deny::Segment(name) => path.split('/').any(|segment| segment == name),
            Deny::Contains(needle) => path.contains(needle),
            Deny::FileName(name) => path.rsplit('/').next() == Some(name),
            Deny::Versioned { parent, name } => {
                let segments: Vec<&str> = path.split('/').collect();
                segments
                    .windows(2)
                    .any(|pair| pair[0] == parent && is_versioned(pair[1], name))
            }
        }
    }
}

/// `python3.12` for name `python`: the name, then digits and dots.
fn is_versioned(segment: &str, name: &str) -> bool {
    segment.strip_prefix(name).is_some_and(|version| {
        version.starts_with(|c: char| c.is_ascii_digit())
            && version.chars().all(|c| c.is_ascii_digit() || c == '.')
    })
}

const SHARED: &[Deny] = &[
    Deny::Prefix("/usr/"),
    Deny::Prefix("/opt/"),
    Deny::Prefix("/proc/"),
    Deny::Prefix("/nix/store/"),
    Deny::Prefix("/snap/"),
    Deny::Prefix("/Library/"),
    Deny::Prefix("/System/"),
    Deny::Segment("node_modules"),
    Deny::Segment("site-packages"),
    Deny::Segment("dist-packages"),
    Deny::Segment(".venv"),
    Deny::Segment("venv"),
    Deny::Segment("hostedtoolcache"),
];

const PYTHON: &[Deny] = &[
    Deny::Versioned {
        parent: "lib",
        name: "python",
    },
    Deny::Segment("__pypackages__"),
    Deny::Segment(".tox"),
    Deny::Segment(".nox"),
];

const RUST: &[Deny] = &[
    Deny::Prefix("/rustc/"),
    Deny::Segment(".cargo"),
    Deny::Segment(".rustup"),
    Deny::Contains("library/std/"),
    Deny::Contains("library/core/"),
    Deny::Contains("library/alloc/"),
];

const GO: &[Deny] = &[
    Deny::Contains("/go/src/"),
    Deny::Contains("pkg/mod/"),
    Deny::Segment("vendor"),
];

const NODE: &[Deny] = &[
    Deny::Prefix("node:"),
    Deny::Prefix("internal/"),
    Deny::Contains("webpack/bootstrap"),
    Deny::Segment(".pnpm"),
    Deny::Segment(".yarn"),
];

/// JDK and test-framework sources that show up in stack traces.
const JVM: &[Deny] = &[
    Deny::Contains(".m2/repository/"),
    Deny::Contains(".gradle/caches/"),
    Deny::FileName("ArrayList.java"),
    Deny::FileName("HashMap.java"),
    Deny::FileName("Method.java"),
    Deny::FileName("Class.java"),
    Deny::FileName("String.java"),
    Deny::FileName("Integer.java"),
    Deny::FileName("Object.java"),
    Deny::FileName("Thread.java"),
    Deny::FileName("AssertEquals.java"),
    Deny::FileName("Assertions.java"),
    Deny::FileName("AssertionFailureBuilder.java"),
    Deny::FileName("Assert.java"),
    Deny::FileName("Test.java"),
    Deny::FileName("Before.java"),
    Deny::FileName("After.java"),
    Deny::FileName("Suite.java"),
    Deny::FileName("NativeMethodAccessorImpl.java"),
    Deny::FileName("DelegatingMethodAccessorImpl.java"),
    Deny::FileName("DirectMethodHandleAccessor.java"),
    Deny::FileName("ThreadPoolExecutor.java"),
    Deny::FileName("FutureTask.java"),
];

const DOTNET: &[Deny] = &[
    Deny::Contains(".nuget/packages/"),
    Deny::Prefix("/_/"),
    Deny::Contains("/dotnet/shared/"),
];

const PHP: &[Deny] = &[Deny::Segment("vendor")];

const RUBY: &[Deny] = &[
    Deny::Segment("vendor"),
    Deny::Segment("gems"),
    Deny::Contains("/lib/ruby/"),
];

const NATIVE: &[Deny] = &[
    Deny::Contains("/include/c++/"),
    Deny::Segment("MSVC"),
    Deny::Segment("Windows Kits"),
];

const SWIFT: &[Deny] = &[
    Deny::Contains(".build/checkouts/"),
    Deny::Prefix("/Applications/"),
    Deny::Segment("Toolchains"),
];

/// Qualifier namespaces of JVM frames that belong to the runtime or test
/// frameworks rather than the project.
const JVM_LIBRARY_NAMESPACES: &[&str] = &[
    "java.",
    "javax.",
    "jdk.",
    "sun.",
    "com.sun.",
    "kotlin.",
    "kotlinx.",
    "scala.",
    "groovy.",
    "org.junit.",
    "junit.",
    "org.gradle.",
    "worker.org.gradle.",
    "org.apache.maven.",
    "org.testng.",
    "org.opentest4j.",
    "org.springframework.",
];

/// Build files that carry no extension.
const EXTENSIONLESS_FILES: &[&str] = &[
    "Dockerfile",
    "Makefile",
    "makefile",
    "GNUmakefile",
    "Gemfile",
    "Rakefile",
    "Jenkinsfile",
    "Vagrantfile",
    "Justfile",
    "justfile",
    "Podfile",
    "Brewfile",
    "Procfile",
];

fn ecosystem_denylist(ecosystem: Ecosystem) -> &'static [Deny] {
    match ecosystem {
        Ecosystem::Python => PYTHON,
        Ecosystem::Rust => RUST,
        Ecosystem::Go => GO,
        Ecosystem::Node => NODE,
        Ecosystem::Jvm => JVM,
        Ecosystem::DotNet => DOTNET,
        Ecosystem::Php => PHP,
        Ecosystem::Ruby => RUBY,
        Ecosystem::Native => NATIVE,
        Ecosystem::Swift => SWIFT,
        Ecosystem::Docker | Ecosystem::Make | Ecosystem::GithubActions | Ecosystem::Generic => &[],
    }
}

/// Whether the path points into a standard library, toolchain or installed
/// dependency for the given ecosystem.
#[must_use]
pub fn is_library_path(path: &str, ecosystem: Ecosystem) -> bool {
    SHARED
        .iter()
        .chain(ecosystem_denylist(ecosystem))
        .any(|deny| deny.matches(path))
}

/// Whether a JVM frame symbol (`java.base/java.lang.Thread.run`) belongs to
/// the runtime or a test framework. A module prefix before `/` is ignored.
#[must_use]
pub fn is_library_frame(qualifier: &str) -> bool {
    let symbol = qualifier.rsplit('/').next().unwrap_or(qualifier);
    JVM_LIBRARY_NAMESPACES
        .iter()
        .any(|namespace| symbol.starts_with(namespace))
}

/// Length bounds plus a file name that has an extension or is a known
/// extension-less build file.
#[must_use]
pub fn is_plausible_path(path: &str, min_len: usize, max_len: usize) -> bool {
    let len = path.chars().count();
    if len < min_len || len > max_len {
        return false;
    }
    if path.contains(['<', '>', '|', '*', '?']) {
        return false;
    }

    let file_name = path.rsplit('/').next().unwrap_or(path);
    if EXTENSIONLESS_FILES.contains(&file_name) {
        return true;
    }

    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.chars().any(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_denylist() {
        for path in [
            "/usr/lib/python3.12/site-packages/pkg/module.py",
            "/opt/hostedtoolcache/Python/3.12/lib/python3.12/asyncio.py",
            "web/node_modules/react/index.js",
            ".venv/lib/x.py",
            "/hostedtoolcache/windows/Python/x.py",
        ] {
            assert!(is_library_path(path, Ecosystem::Generic), "{path}");
        }
        assert!(!is_library_path("src/main.py", Ecosystem::Python));
        assert!(!is_library_path("src/node_modules_helper.js", Ecosystem::Node));
    }

    #[test]
    fn test_python_interpreter_layout() {
        for path in [
            "/home/runner/.pyenv/versions/3.12.1/lib/python3.12/asyncio/runners.py",
            "/root/.local/lib/python3/json/decoder.py",
        ] {
            assert!(is_library_path(path, Ecosystem::Python), "{path}");
        }
        for path in [
            "src/lib/python_utils.py",
            "lib/python/helpers.py",
            "pkg/lib/pythonic.py",
        ] {
            assert!(!is_library_path(path, Ecosystem::Python), "{path}");
        }
    }

    #[test]
    fn test_ecosystem_denylists() {
        assert!(is_library_path("/rustc/abc123/library/core/src/panicking.rs", Ecosystem::Rust));
        assert!(is_library_path("/home/u/.cargo/registry/src/x/lib.rs", Ecosystem::Rust));
        assert!(is_library_path("node:internal/modules/cjs/loader.js", Ecosystem::Node));
        assert!(is_library_path("/root/go/pkg/mod/github.com/x/y.go", Ecosystem::Go));
        assert!(is_library_path("vendor/laravel/framework/src/x.php", Ecosystem::Php));
        assert!(is_library_path("Thread.java", Ecosystem::Jvm));
        assert!(!is_library_path("Thread.java", Ecosystem::Generic));
        assert!(!is_library_path("src/vendor.go", Ecosystem::Go));
    }

    #[test]
    fn test_library_frames() {
        assert!(is_library_frame("org.junit.Assert.fail"));
        assert!(is_library_frame("java.base/java.lang.Thread.run"));
        assert!(is_library_frame("app//org.junit.runners.ParentRunner.run"));
        assert!(!is_library_frame("com.example.App.main"));
        assert!(!is_library_frame("javaapp.Main.run"));
    }

    #[test]
    fn test_plausible_paths() {
        assert!(is_plausible_path("src/main.py", 3, 200));
        assert!(is_plausible_path("Dockerfile", 3, 200));
        assert!(is_plausible_path("ci/Makefile", 3, 200));
        assert!(is_plausible_path(".eslintrc", 3, 200));
        assert!(!is_plausible_path("a.c", 4, 200));
        assert!(!is_plausible_path("lodash", 3, 200));
        assert!(!is_plausible_path("v1.2.3", 3, 200));
        assert!(!is_plausible_path("<string>", 3, 200));
        assert!(!is_plausible_path(&format!("{}.py", "a".repeat(200)), 3, 200));
    }
}
