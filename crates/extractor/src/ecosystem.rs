use serde::{Deserialize, Serialize};
use std::fmt;

/// Language or build-tool family that produced a file reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ecosystem {
    Python,
    Rust,
    Go,
    Node,
    Jvm,
    #[serde(rename = "dotnet")]
    DotNet,
    Php,
    Ruby,
    Native,
    Swift,
    Docker,
    Make,
    GithubActions,
    Generic,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 14] = [
        Ecosystem::Python,
        Ecosystem::Rust,
        Ecosystem::Go,
        Ecosystem::Node,
        Ecosystem::Jvm,
        Ecosystem::DotNet,
        Ecosystem::Php,
        Ecosystem::Ruby,
        Ecosystem::Native,
        Ecosystem::Swift,
        Ecosystem::Docker,
        Ecosystem::Make,
        Ecosystem::GithubActions,
        Ecosystem::Generic,
    ];

    /// Detect ecosystem from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "py" | "pyw" | "pyi" | "pyx" => Ecosystem::Python,
            "rs" => Ecosystem::Rust,
            "go" => Ecosystem::Go,
            "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" | "mts" | "cts" | "vue" | "svelte" => {
                Ecosystem::Node
            }
            "java" | "kt" | "kts" | "scala" | "groovy" | "gradle" => Ecosystem::Jvm,
            "cs" | "fs" | "vb" | "csproj" | "fsproj" | "vbproj" | "sln" | "props" | "targets"
            | "razor" | "cshtml" => Ecosystem::DotNet,
            "php" | "phtml" => Ecosystem::Php,
            "rb" | "rake" | "gemspec" | "erb" => Ecosystem::Ruby,
            "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" | "inl" | "m" | "mm" => {
                Ecosystem::Native
            }
            "swift" => Ecosystem::Swift,
            "mk" | "cmake" => Ecosystem::Make,
            "dockerfile" => Ecosystem::Docker,
            _ => Ecosystem::Generic,
        }
    }

    /// Detect ecosystem from a `/`-separated path, recognizing well-known
    /// extension-less build files before falling back to the extension.
    pub fn from_path(path: &str) -> Self {
        if path.contains(".github/workflows/") {
            return Ecosystem::GithubActions;
        }

        let file_name = path.rsplit('/').next().unwrap_or(path);
        if file_name == "Dockerfile" || file_name.starts_with("Dockerfile.") {
            return Ecosystem::Docker;
        }
        match file_name {
            "Makefile" | "makefile" | "GNUmakefile" | "CMakeLists.txt" | "Justfile" => {
                return Ecosystem::Make
            }
            "Gemfile" | "Rakefile" => return Ecosystem::Ruby,
            _ => {}
        }

        file_name
            .rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(Ecosystem::Generic)
    }

    /// Get ecosystem name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Ecosystem::Python => "python",
            Ecosystem::Rust => "rust",
            Ecosystem::Go => "go",
            Ecosystem::Node => "node",
            Ecosystem::Jvm => "jvm",
            Ecosystem::DotNet => "dotnet",
            Ecosystem::Php => "php",
            Ecosystem::Ruby => "ruby",
            Ecosystem::Native => "native",
            Ecosystem::Swift => "swift",
            Ecosystem::Docker => "docker",
            Ecosystem::Make => "make",
            Ecosystem::GithubActions => "github_actions",
            Ecosystem::Generic => "generic",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
