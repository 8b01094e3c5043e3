use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What a signal observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// A file name (marker file or dependency manifest)
    File,
    /// A root-relative directory path using `/` separators
    Directory,
    /// A lower-cased file extension without the leading dot
    Extension,
    /// A dependency declared in a manifest, prefixed with its ecosystem (`npm:react`)
    Dependency,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::File => "file",
            SignalKind::Directory => "directory",
            SignalKind::Extension => "extension",
            SignalKind::Dependency => "dependency",
        }
    }
}

/// A single presence observation made while scanning a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub value: String,
    pub source_path: PathBuf,
}

impl Signal {
    pub fn new(kind: SignalKind, value: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            value: value.into(),
            source_path: source_path.into(),
        }
    }
}

/// Deduplicated set of signals, one per `(kind, value)` pair.
///
/// The first source path recorded for a pair is kept. Iteration is sorted by
/// kind and then value so anything derived from the set is reproducible.
#[derive(Debug, Clone, Default)]
pub struct SignalSet {
    signals: BTreeMap<(SignalKind, String), PathBuf>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a signal. Returns false if an equal `(kind, value)` was already present.
    pub fn insert(&mut self, signal: Signal) -> bool {
        let key = (signal.kind, signal.value);
        if self.signals.contains_key(&key) {
            return false;
        }
        self.signals.insert(key, signal.source_path);
        true
    }

    /// Convenience for tests and manual construction
    pub fn add(&mut self, kind: SignalKind, value: &str) -> &mut Self {
        self.insert(Signal::new(kind, value, value));
        self
    }

    pub fn contains(&self, kind: SignalKind, value: &str) -> bool {
        self.signals.contains_key(&(kind, value.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals
            .iter()
            .map(|((kind, value), path)| Signal::new(*kind, value.clone(), path.clone()))
    }

    pub fn count_of(&self, kind: SignalKind) -> usize {
        self.signals.keys().filter(|(k, _)| *k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl FromIterator<Signal> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        let mut set = SignalSet::new();
        for signal in iter {
            set.insert(signal);
        }
        set
    }
}

impl Extend<Signal> for SignalSet {
    fn extend<I: IntoIterator<Item = Signal>>(&mut self, iter: I) {
        for signal in iter {
            self.insert(signal);
        }
    }
}

/// Options controlling a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum recursion depth for the tree walk (root children are depth 1)
    pub max_depth: usize,
    /// Directory names pruned in addition to the built-in denylist
    pub extra_excluded_dirs: Vec<String>,
    /// Subdirectories (relative to root, `""` for the root) checked for dependency manifests
    pub manifest_dirs: Vec<String>,
    /// Apply .gitignore rules while walking
    pub respect_gitignore: bool,
    /// Root-relative files (`/` separators) that produce no signals, such as
    /// previously generated output
    pub excluded_files: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: 6,
            extra_excluded_dirs: vec![],
            manifest_dirs: vec![
                String::new(),
                "client".to_string(),
                "server".to_string(),
                "frontend".to_string(),
                "backend".to_string(),
            ],
            respect_gitignore: false,
            excluded_files: vec![],
        }
    }
}
