//! Dependency manifest parsing
//!
//! Reads package manifests at a small set of conventional locations and turns
//! their declared dependencies into `Dependency` signals. A manifest that
//! cannot be read or parsed contributes no dependency signals.

use super::types::{Signal, SignalKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    /// Leading distribution name of a PEP 508 requirement string
    static ref REQUIREMENT_NAME: Regex =
        Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)").expect("static regex is valid");
}

const NPM_DEPENDENCY_KEYS: &[&str] = &["dependencies", "devDependencies", "peerDependencies"];

/// Collect manifest signals from `root/<dir>` for every configured directory
pub fn scan_manifests(root: &Path, manifest_dirs: &[String]) -> Vec<Signal> {
    let mut signals = Vec::new();

    for dir in manifest_dirs {
        let base = if dir.is_empty() { root.to_path_buf() } else { root.join(dir) };
        if !base.is_dir() {
            continue;
        }

        let package_json = base.join("package.json");
        if package_json.is_file() {
            signals.push(Signal::new(SignalKind::File, "package.json", package_json.clone()));
            signals.extend(read_package_json(&package_json));
        }

        let requirements = base.join("requirements.txt");
        if requirements.is_file() {
            signals.push(Signal::new(SignalKind::File, "requirements.txt", requirements.clone()));
            signals.extend(read_requirements(&requirements));
        }

        let pyproject = base.join("pyproject.toml");
        if pyproject.is_file() {
            signals.push(Signal::new(SignalKind::File, "pyproject.toml", pyproject.clone()));
            signals.extend(read_pyproject(&pyproject));
        }
    }

    signals
}

/// Dependencies from a package.json (`npm:<name>`)
pub fn read_package_json(path: &Path) -> Vec<Signal> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Skipping unreadable manifest {}: {}", path.display(), e);
            return vec![];
        }
    };

    parse_package_json(&content)
        .unwrap_or_else(|| {
            tracing::debug!("Ignoring malformed manifest {}", path.display());
            vec![]
        })
        .into_iter()
        .map(|name| Signal::new(SignalKind::Dependency, format!("npm:{name}"), path))
        .collect()
}

/// Dependency names declared in package.json content, or None if it is not a JSON object
pub fn parse_package_json(content: &str) -> Option<Vec<String>> {
    let manifest: serde_json::Value = serde_json::from_str(content).ok()?;
    let manifest = manifest.as_object()?;

    let mut names = Vec::new();
    for key in NPM_DEPENDENCY_KEYS {
        if let Some(deps) = manifest.get(*key).and_then(|d| d.as_object()) {
            names.extend(deps.keys().cloned());
        }
    }
    Some(names)
}

/// Dependencies from a requirements.txt (`pypi:<name>`)
pub fn read_requirements(path: &Path) -> Vec<Signal> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_requirements(&content)
            .into_iter()
            .map(|name| Signal::new(SignalKind::Dependency, format!("pypi:{name}"), path))
            .collect(),
        Err(e) => {
            tracing::debug!("Skipping unreadable manifest {}: {}", path.display(), e);
            vec![]
        }
    }
}

/// Normalized distribution names from requirements.txt content
pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty() && !line.starts_with('-'))
        .filter_map(requirement_name)
        .collect()
}

/// Dependencies from a pyproject.toml (`pypi:<name>`)
pub fn read_pyproject(path: &Path) -> Vec<Signal> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Skipping unreadable manifest {}: {}", path.display(), e);
            return vec![];
        }
    };

    parse_pyproject(&content)
        .unwrap_or_else(|| {
            tracing::debug!("Ignoring malformed manifest {}", path.display());
            vec![]
        })
        .into_iter()
        .map(|name| Signal::new(SignalKind::Dependency, format!("pypi:{name}"), path))
        .collect()
}

/// Names from `[project].dependencies` and `[tool.poetry.dependencies]`
pub fn parse_pyproject(content: &str) -> Option<Vec<String>> {
    let document: toml::Table = toml::from_str(content).ok()?;
    let mut names = Vec::new();

    if let Some(deps) = document
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
    {
        names.extend(deps.iter().filter_map(|d| d.as_str()).filter_map(requirement_name));
    }

    if let Some(deps) = document
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_table())
    {
        names.extend(
            deps.keys()
                .filter(|name| name.as_str() != "python")
                .filter_map(|name| requirement_name(name)),
        );
    }

    Some(names)
}

fn requirement_name(spec: &str) -> Option<String> {
    REQUIREMENT_NAME
        .captures(spec)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase().replace('_', "-"))
}
