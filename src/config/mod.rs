//! Configuration management for stackguard
//!
//! Settings are layered with figment (see [`ConfigSources`]) and extracted into the
//! typed [`StackguardConfig`]. Every field has a default, so an empty layer
//! stack still yields a usable configuration.

pub mod core;

#[cfg(test)]
mod tests;

use crate::render::{
    DEFAULT_CONFIG_FILE, DEFAULT_MANIFEST_FILE, DEFAULT_PRE_COMMIT_VERSION, Platform, RenderOptions,
};
use crate::scanner::ScanOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use self::core::{ConfigSources, load};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StackguardConfig {
    /// Generated file names
    pub output: OutputConfig,

    /// Project tree scanning
    pub scan: ScanConfig,

    /// Document rendering
    pub render: RenderConfig,
}

/// Where the two artifacts are written, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub config_file: String,
    pub manifest_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Tree walk depth; children of the root are depth 1
    pub max_depth: usize,

    /// Directory names pruned in addition to the built-in denylist
    pub extra_excluded_dirs: Vec<String>,

    /// Where dependency manifests are read (`""` is the root)
    pub manifest_dirs: Vec<String>,

    /// Honour .gitignore while walking
    pub respect_gitignore: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// `auto`, `posix` or `windows`
    pub platform: String,

    /// Minimum hook runtime version
    pub pre_commit_version: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        let options = ScanOptions::default();
        Self {
            max_depth: options.max_depth,
            extra_excluded_dirs: options.extra_excluded_dirs,
            manifest_dirs: options.manifest_dirs,
            respect_gitignore: options.respect_gitignore,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            platform: "auto".to_string(),
            pre_commit_version: DEFAULT_PRE_COMMIT_VERSION.to_string(),
        }
    }
}

impl StackguardConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_depth: self.scan.max_depth,
            extra_excluded_dirs: self.scan.extra_excluded_dirs.clone(),
            manifest_dirs: self.scan.manifest_dirs.clone(),
            respect_gitignore: self.scan.respect_gitignore,
            excluded_files: vec![
                self.output.config_file.clone(),
                self.output.manifest_file.clone(),
            ],
        }
    }

    /// Render options using the configured platform
    pub fn render_options(&self) -> Result<RenderOptions> {
        let platform: Platform = self
            .render
            .platform
            .parse()
            .context("Invalid render.platform setting")?;
        Ok(self.render_options_for(platform))
    }

    /// Render options with an explicit platform
    pub fn render_options_for(&self, platform: Platform) -> RenderOptions {
        RenderOptions {
            platform,
            pre_commit_version: self.render.pre_commit_version.clone(),
            config_file: self.output.config_file.clone(),
            manifest_file: self.output.manifest_file.clone(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.config_file.trim().is_empty() {
            anyhow::bail!("output.config_file cannot be empty");
        }
        if self.output.manifest_file.trim().is_empty() {
            anyhow::bail!("output.manifest_file cannot be empty");
        }
        if self.output.config_file == self.output.manifest_file {
            anyhow::bail!("output.config_file and output.manifest_file must differ");
        }
        if self.scan.max_depth == 0 {
            anyhow::bail!("scan.max_depth must be at least 1");
        }
        if self.render.pre_commit_version.trim().is_empty() {
            anyhow::bail!("render.pre_commit_version cannot be empty");
        }
        self.render
            .platform
            .parse::<Platform>()
            .context("Invalid render.platform setting")?;

        Ok(())
    }
}
