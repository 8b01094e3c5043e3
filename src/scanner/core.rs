use super::directory::DirectoryHandler;
use super::manifest::scan_manifests;
use super::types::{ScanOptions, Signal, SignalKind, SignalSet};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::Path;

/// Collect every presence signal under `root`.
///
/// Only a missing or non-directory root is an error. Anything unreadable below
/// the root is skipped and logged at debug level.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<SignalSet> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Cannot read project root {}", root.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("Project root {} is not a directory", root.display());
    }

    let mut signals = SignalSet::new();
    signals.extend(scan_top_level(root, &options.excluded_files));
    signals.extend(walk_tree(root, options));
    signals.extend(scan_manifests(root, &options.manifest_dirs));

    tracing::debug!(
        "Collected {} signals ({} files, {} directories, {} extensions, {} dependencies)",
        signals.len(),
        signals.count_of(SignalKind::File),
        signals.count_of(SignalKind::Directory),
        signals.count_of(SignalKind::Extension),
        signals.count_of(SignalKind::Dependency),
    );

    Ok(signals)
}

/// Marker files directly under the root
fn scan_top_level(root: &Path, excluded_files: &[String]) -> Vec<Signal> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", root.display(), e);
            return vec![];
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if excluded_files.contains(&name) {
                return None;
            }
            Some(Signal::new(SignalKind::File, name, entry.path()))
        })
        .collect()
}

/// Depth-bounded walk producing directory and extension signals
fn walk_tree(root: &Path, options: &ScanOptions) -> Vec<Signal> {
    let mut denied: Vec<String> = DirectoryHandler::default()
        .all_filtered_directories()
        .into_iter()
        .map(String::from)
        .collect();
    denied.extend(options.extra_excluded_dirs.iter().cloned());

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .max_depth(Some(options.max_depth))
        .sort_by_file_name(|a, b| a.cmp(b));
    if options.respect_gitignore {
        builder.git_ignore(true).require_git(false);
    }
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        let name = entry.file_name().to_string_lossy();
        !(is_dir && denied.iter().any(|d| d.as_str() == name.as_ref()))
    });

    let mut signals = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        let value = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        match entry.file_type() {
            Some(t) if t.is_dir() => {
                signals.push(Signal::new(SignalKind::Directory, value, path));
            }
            Some(t) if t.is_file() => {
                if options.excluded_files.contains(&value) {
                    continue;
                }
                if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                    signals.push(Signal::new(SignalKind::Extension, ext.to_lowercase(), path));
                }
            }
            _ => {}
        }
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let temp_dir = project();
        let missing = temp_dir.path().join("nope");
        assert!(scan(&missing, &ScanOptions::default()).is_err());
    }

    #[test]
    fn test_scan_empty_project() {
        let temp_dir = project();
        let signals = scan(temp_dir.path(), &ScanOptions::default()).unwrap();
        assert!(signals.is_empty());
    }

    #[test]
    fn test_scan_collects_markers_directories_and_extensions() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::write(root.join("Cargo.toml"), "[package]\nname = \"x\"").unwrap();
        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::write(root.join(".github/workflows/ci.yml"), "on: push").unwrap();
        fs::create_dir_all(root.join("db")).unwrap();
        fs::write(root.join("db/Schema.SQL"), "create table t();").unwrap();

        let signals = scan(root, &ScanOptions::default()).unwrap();

        assert!(signals.contains(SignalKind::File, "Cargo.toml"));
        assert!(signals.contains(SignalKind::Directory, ".github"));
        assert!(signals.contains(SignalKind::Directory, ".github/workflows"));
        assert!(signals.contains(SignalKind::Extension, "yml"));
        assert!(signals.contains(SignalKind::Extension, "sql"));
        assert!(signals.contains(SignalKind::Extension, "toml"));
    }

    #[test]
    fn test_scan_skips_denied_directories() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
        fs::write(root.join("node_modules/left-pad/index.js"), "module.exports = 1").unwrap();
        fs::create_dir_all(root.join(".venv/lib")).unwrap();
        fs::write(root.join(".venv/lib/site.py"), "pass").unwrap();

        let signals = scan(root, &ScanOptions::default()).unwrap();

        assert!(!signals.contains(SignalKind::Extension, "js"));
        assert!(!signals.contains(SignalKind::Extension, "py"));
        assert!(!signals.contains(SignalKind::Directory, "node_modules"));
    }

    #[test]
    fn test_scan_honors_extra_excluded_dirs() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("third_party")).unwrap();
        fs::write(root.join("third_party/lib.go"), "package lib").unwrap();

        let options = ScanOptions {
            extra_excluded_dirs: vec!["third_party".to_string()],
            ..ScanOptions::default()
        };
        let signals = scan(root, &options).unwrap();
        assert!(!signals.contains(SignalKind::Extension, "go"));
    }

    #[test]
    fn test_scan_ignores_excluded_files() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::write(root.join(".pre-commit-config.yaml"), "repos: []").unwrap();
        fs::write(root.join("requirements-precommit.txt"), "pre-commit>=3.5.0").unwrap();

        let options = ScanOptions {
            excluded_files: vec![
                ".pre-commit-config.yaml".to_string(),
                "requirements-precommit.txt".to_string(),
            ],
            ..ScanOptions::default()
        };
        let signals = scan(root, &options).unwrap();
        assert!(signals.is_empty());

        let signals = scan(root, &ScanOptions::default()).unwrap();
        assert!(signals.contains(SignalKind::File, "requirements-precommit.txt"));
        assert!(signals.contains(SignalKind::Extension, "yaml"));
    }

    #[test]
    fn test_scan_respects_max_depth() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("a/b/c/deep.rb"), "puts 1").unwrap();

        let shallow = ScanOptions {
            max_depth: 2,
            ..ScanOptions::default()
        };
        let signals = scan(root, &shallow).unwrap();
        assert!(signals.contains(SignalKind::Directory, "a/b"));
        assert!(!signals.contains(SignalKind::Extension, "rb"));

        let signals = scan(root, &ScanOptions::default()).unwrap();
        assert!(signals.contains(SignalKind::Extension, "rb"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_follow_symlinks() {
        let temp_dir = project();
        let outside = project();
        fs::write(outside.path().join("secret.php"), "<?php").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("linked")).unwrap();

        let signals = scan(temp_dir.path(), &ScanOptions::default()).unwrap();
        assert!(!signals.contains(SignalKind::Extension, "php"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_unreadable_directories() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = project();
        fs::write(temp_dir.path().join("Cargo.toml"), "[package]").unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src/main.py"), "").unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.rb"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = scan(temp_dir.path(), &ScanOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let signals = result.unwrap();
        assert!(signals.contains(SignalKind::File, "Cargo.toml"));
        assert!(signals.contains(SignalKind::Extension, "py"));
        assert!(!signals.contains(SignalKind::Extension, "rb"));
    }
}
