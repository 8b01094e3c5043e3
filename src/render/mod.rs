//! Configuration rendering
//!
//! Turns a [`Configuration`] into the hook pipeline document and the tool
//! manifest text. Rendering is pure: the same configuration and options always
//! produce byte-identical output.

pub mod dialect;
pub mod document;
pub mod manifest;


use crate::compose::Configuration;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use dialect::{CommandDialect, DetectorContext, PosixDialect, PowerShellDialect};
pub use document::{ConfigDocument, HookEntry, RepoEntry};
pub use manifest::ToolManifest;

pub const DEFAULT_CONFIG_FILE: &str = ".pre-commit-config.yaml";
pub const DEFAULT_MANIFEST_FILE: &str = "requirements-precommit.txt";
pub const DEFAULT_PRE_COMMIT_VERSION: &str = "3.5.0";

/// Shell dialect native detectors are rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// The platform this binary runs on
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    pub fn dialect(&self) -> Box<dyn CommandDialect> {
        match self {
            Platform::Posix => Box::new(PosixDialect),
            Platform::Windows => Box::new(PowerShellDialect),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Posix => "posix",
            Platform::Windows => "windows",
        }
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    /// Accepts `auto` for the host platform
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Platform::current()),
            "posix" | "unix" | "linux" | "macos" => Ok(Platform::Posix),
            "windows" | "powershell" => Ok(Platform::Windows),
            other => anyhow::bail!("Unknown platform '{}' (expected auto, posix or windows)", other),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub platform: Platform,
    /// Used for `minimum_pre_commit_version` and the runtime manifest line
    pub pre_commit_version: String,
    pub config_file: String,
    pub manifest_file: String,
}

impl RenderOptions {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            pre_commit_version: DEFAULT_PRE_COMMIT_VERSION.to_string(),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }
}

/// Both artifacts, rendered and not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub document: ConfigDocument,
    pub config: String,
    pub manifest: ToolManifest,
    pub manifest_text: String,
}

/// Render with default file names for `platform`
pub fn render(configuration: &Configuration, platform: Platform) -> Result<RenderedOutput> {
    render_with(configuration, &RenderOptions::for_platform(platform))
}

pub fn render_with(configuration: &Configuration, options: &RenderOptions) -> Result<RenderedOutput> {
    let dialect = options.platform.dialect();
    let context = DetectorContext::new(&options.config_file, &options.manifest_file);
    tracing::debug!(
        "Rendering {} groups with the {} dialect",
        configuration.len(),
        dialect.name()
    );

    let document = ConfigDocument::build(
        configuration,
        &options.pre_commit_version,
        dialect.as_ref(),
        &context,
    );
    let body = serde_yml::to_string(&document).context("Failed to serialize hook configuration")?;
    let config = format!("{}{}", document::header(configuration, &options.manifest_file), body);

    let manifest = ToolManifest::from_configuration(configuration, &options.pre_commit_version);
    let manifest_text = manifest.to_text();

    Ok(RenderedOutput {
        document,
        config,
        manifest,
        manifest_text,
    })
}
