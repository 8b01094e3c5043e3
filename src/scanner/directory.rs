/// Fixed denylist of directories that never contribute signals.
///
/// The same list feeds the tree walk and the `--exclude-dir` arguments of the
/// rendered native detectors, so both agree on what "the project" is.
#[derive(Debug)]
pub struct DirectoryHandler {
    /// Version control directories
    pub vcs: &'static [&'static str],
    /// Node.js/JavaScript dependency and build directories
    pub nodejs: &'static [&'static str],
    /// Python virtual environments and caches
    pub python: &'static [&'static str],
    /// Rust build directory
    pub rust: &'static [&'static str],
    /// Go and PHP vendored dependencies
    pub vendor: &'static [&'static str],
    /// Generic build output directories
    pub build: &'static [&'static str],
    /// IDE directories
    pub ide: &'static [&'static str],
    /// Test coverage directories
    pub coverage: &'static [&'static str],
}

impl Default for DirectoryHandler {
    fn default() -> Self {
        Self {
            vcs: &[".git", ".svn", ".hg"],
            nodejs: &["node_modules", ".next", ".nuxt"],
            python: &[
                "venv",
                ".venv",
                "env",
                "__pycache__",
                ".tox",
                ".mypy_cache",
                ".pytest_cache",
            ],
            rust: &["target"],
            vendor: &["vendor"],
            build: &["dist", "build", "out"],
            ide: &[".idea", ".vscode"],
            coverage: &["coverage"],
        }
    }
}

impl DirectoryHandler {
    /// All directory names pruned during scanning, in a fixed order
    pub fn all_filtered_directories(&self) -> Vec<&'static str> {
        let mut dirs = Vec::new();
        dirs.extend_from_slice(self.vcs);
        dirs.extend_from_slice(self.nodejs);
        dirs.extend_from_slice(self.python);
        dirs.extend_from_slice(self.rust);
        dirs.extend_from_slice(self.vendor);
        dirs.extend_from_slice(self.build);
        dirs.extend_from_slice(self.ide);
        dirs.extend_from_slice(self.coverage);
        dirs
    }

    /// Check if a directory name should be skipped
    pub fn should_filter_directory(&self, dir_name: &str) -> bool {
        self.all_filtered_directories().contains(&dir_name)
    }
}
