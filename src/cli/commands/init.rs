//! Interactive setup
//!
//! Asks whether to show advanced options, the team size and (only in advanced
//! mode) the security level, then generates like `stackguard generate`.

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};

use super::generate::generate_and_write;
use crate::cli::CommandContext;
use crate::compose::SecurityLevel;
use crate::render::Platform;

#[derive(Args)]
pub struct InitArgs {
    /// Detector command dialect: auto, posix or windows [default: from config]
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<Platform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSize {
    Solo,
    Small,
    Large,
}

impl TeamSize {
    pub const ALL: [TeamSize; 3] = [TeamSize::Solo, TeamSize::Small, TeamSize::Large];

    pub fn label(&self) -> &'static str {
        match self {
            TeamSize::Solo => "Solo developer",
            TeamSize::Small => "Small team (2-10 developers)",
            TeamSize::Large => "Large team or enterprise",
        }
    }

    /// Security level suggested when the user does not pick one
    pub fn default_level(&self) -> SecurityLevel {
        match self {
            TeamSize::Solo => SecurityLevel::Basic,
            TeamSize::Small => SecurityLevel::Enhanced,
            TeamSize::Large => SecurityLevel::Maximum,
        }
    }
}

/// The three answers that reach the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers {
    pub advanced: bool,
    pub team_size: TeamSize,
    pub level: SecurityLevel,
}

impl Answers {
    /// Resolve the level: the explicit choice in advanced mode, otherwise the team default
    pub fn resolve(advanced: bool, team_size: TeamSize, chosen: Option<SecurityLevel>) -> Self {
        let level = match (advanced, chosen) {
            (true, Some(level)) => level,
            _ => team_size.default_level(),
        };
        Self {
            advanced,
            team_size,
            level,
        }
    }
}

fn level_label(level: SecurityLevel) -> &'static str {
    match level {
        SecurityLevel::Basic => "1 - Basic: secret scanning and stack linters",
        SecurityLevel::Enhanced => "2 - Enhanced: adds file hygiene, secret baseline, dependency audit",
        SecurityLevel::Maximum => "3 - Maximum: adds native content and key file detectors",
    }
}

fn ask() -> Result<Answers> {
    let theme = ColorfulTheme::default();

    let advanced = Confirm::with_theme(&theme)
        .with_prompt("Configure advanced options?")
        .default(false)
        .interact()
        .context("Failed to read answer")?;

    let sizes: Vec<_> = TeamSize::ALL.iter().map(|t| t.label()).collect();
    let size_index = Select::with_theme(&theme)
        .with_prompt("How large is the team working on this project?")
        .items(&sizes)
        .default(0)
        .interact()
        .context("Failed to read answer")?;
    let team_size = TeamSize::ALL[size_index];

    let chosen = if advanced {
        let levels: Vec<_> = SecurityLevel::ALL.iter().map(|l| level_label(*l)).collect();
        let default_index = SecurityLevel::ALL
            .iter()
            .position(|l| *l == team_size.default_level())
            .unwrap_or(0);
        let level_index = Select::with_theme(&theme)
            .with_prompt("Security level")
            .items(&levels)
            .default(default_index)
            .interact()
            .context("Failed to read answer")?;
        Some(SecurityLevel::ALL[level_index])
    } else {
        None
    };

    Ok(Answers::resolve(advanced, team_size, chosen))
}

pub async fn execute(args: InitArgs, ctx: &CommandContext) -> Result<()> {
    if !console::user_attended() {
        anyhow::bail!(
            "stackguard init needs an interactive terminal; use `stackguard generate --level <1|2|3>` instead"
        );
    }

    ctx.output.header("stackguard setup");
    let answers = ask()?;
    tracing::debug!("Setup answers: {:?}", answers);
    ctx.output.info(&format!("Using security level {}", answers.level));

    generate_and_write(ctx, answers.level, args.platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_size_defaults() {
        assert_eq!(TeamSize::Solo.default_level(), SecurityLevel::Basic);
        assert_eq!(TeamSize::Small.default_level(), SecurityLevel::Enhanced);
        assert_eq!(TeamSize::Large.default_level(), SecurityLevel::Maximum);
    }

    #[test]
    fn test_level_only_chosen_in_advanced_mode() {
        let simple = Answers::resolve(false, TeamSize::Solo, Some(SecurityLevel::Maximum));
        assert_eq!(simple.level, SecurityLevel::Basic);

        let advanced = Answers::resolve(true, TeamSize::Solo, Some(SecurityLevel::Maximum));
        assert_eq!(advanced.level, SecurityLevel::Maximum);

        let unanswered = Answers::resolve(true, TeamSize::Large, None);
        assert_eq!(unanswered.level, SecurityLevel::Maximum);
    }
}
