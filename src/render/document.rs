//! Hook pipeline document model
//!
//! Field order of these structs is the field order of the emitted YAML.

use super::dialect::{CommandDialect, DetectorContext};
use crate::compose::{Configuration, Invocation, SourceRef, ToolGroup};
use serde::{Deserialize, Serialize};

/// Repository value the hook runtime uses for locally defined hooks
pub const LOCAL_REPO: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub minimum_pre_commit_version: String,
    pub fail_fast: bool,
    pub repos: Vec<RepoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub hooks: Vec<HookEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_filenames: Option<bool>,
}

impl HookEntry {
    fn from_group(group: &ToolGroup, dialect: &dyn CommandDialect, context: &DetectorContext) -> Self {
        let (entry, language, pass_filenames) = match &group.invocation {
            Invocation::Plugin => (None, None, None),
            Invocation::Command { entry, language } => {
                (Some(entry.clone()), Some(language.clone()), Some(false))
            }
            Invocation::Detector(spec) => (
                Some(dialect.entry(spec, context)),
                Some("system".to_string()),
                Some(false),
            ),
        };

        Self {
            id: group.identifier.clone(),
            name: group.display_name.clone(),
            entry,
            language,
            files: group.files.clone(),
            exclude: group.exclude.clone(),
            args: group.args.clone(),
            pass_filenames,
        }
    }
}

fn repo_fields(source: &SourceRef) -> (String, Option<String>) {
    match source {
        SourceRef::Remote { repo, rev } => (repo.clone(), Some(rev.clone())),
        SourceRef::Local => (LOCAL_REPO.to_string(), None),
    }
}

impl ConfigDocument {
    /// Lay out a configuration, merging consecutive groups from one source
    pub fn build(
        configuration: &Configuration,
        minimum_version: &str,
        dialect: &dyn CommandDialect,
        context: &DetectorContext,
    ) -> Self {
        let mut repos: Vec<RepoEntry> = Vec::new();

        for group in &configuration.groups {
            let (repo, rev) = repo_fields(&group.source);
            let hook = HookEntry::from_group(group, dialect, context);

            match repos.last_mut() {
                Some(last) if last.repo == repo && last.rev == rev => last.hooks.push(hook),
                _ => repos.push(RepoEntry {
                    repo,
                    rev,
                    hooks: vec![hook],
                }),
            }
        }

        Self {
            minimum_pre_commit_version: minimum_version.to_string(),
            fail_fast: false,
            repos,
        }
    }

    pub fn hooks(&self) -> impl Iterator<Item = &HookEntry> {
        self.repos.iter().flat_map(|r| r.hooks.iter())
    }
}

/// Comment block written above the YAML body. Contains nothing time dependent.
pub fn header(configuration: &Configuration, manifest_file: &str) -> String {
    [
        format!("# Generated by stackguard {}", env!("CARGO_PKG_VERSION")),
        format!("# Security level: {}", configuration.level),
        format!("# Detected technologies: {}", configuration.tags),
        format!("# Install tools: pip install -r {manifest_file}"),
        "# Enable hooks: pre-commit install".to_string(),
        String::new(),
    ]
    .join("\n")
}
