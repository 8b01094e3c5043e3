use super::StackguardConfig;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::{Path, PathBuf};

// Embed the default config at compile time
pub const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub const ENV_PREFIX: &str = "STACKGUARD_";

/// Files a configuration is layered from, lowest priority first
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// `~/.config/stackguard/config.toml`; `None` skips the user layer
    pub user_config: Option<PathBuf>,
    /// Project root searched for `stackguard.{toml,json,yaml,yml}`
    pub repo_root: Option<PathBuf>,
    /// Explicit file from `--config`
    pub custom_config: Option<PathBuf>,
}

impl ConfigSources {
    /// User config plus the repository config under `root`
    pub fn for_root(root: &Path, custom_config: Option<&Path>) -> Self {
        Self {
            user_config: user_config_path(),
            repo_root: Some(root.to_path_buf()),
            custom_config: custom_config.map(Path::to_path_buf),
        }
    }

    /// Build the layered figment: defaults, user, repository, custom file, environment
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(user) = &self.user_config {
            figment = figment
                .merge(Toml::file(user))
                .merge(Json::file(user.with_extension("json")))
                .merge(Yaml::file(user.with_extension("yaml")))
                .merge(Yaml::file(user.with_extension("yml")));
        }

        if let Some(root) = &self.repo_root {
            figment = figment
                .merge(Toml::file(root.join("stackguard.toml")))
                .merge(Json::file(root.join("stackguard.json")))
                .merge(Yaml::file(root.join("stackguard.yaml")))
                .merge(Yaml::file(root.join("stackguard.yml")));
        }

        if let Some(custom) = &self.custom_config {
            let extension = custom
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase);
            figment = match extension.as_deref() {
                Some("json") => figment.merge(Json::file(custom)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom)),
                _ => figment.merge(Toml::file(custom)),
            };
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn extract(&self) -> Result<StackguardConfig> {
        if let Some(custom) = &self.custom_config {
            if !custom.is_file() {
                anyhow::bail!("Config file {} does not exist", custom.display());
            }
        }

        let config: StackguardConfig = self
            .figment()
            .extract()
            .context("Failed to load stackguard configuration")?;
        config.validate()?;

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

/// Load the configuration for a project rooted at `root`
pub fn load(root: &Path, custom_config: Option<&Path>) -> Result<StackguardConfig> {
    ConfigSources::for_root(root, custom_config).extract()
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("stackguard").join("config.toml"))
}
