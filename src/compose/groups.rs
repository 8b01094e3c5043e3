use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested security tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SecurityLevel {
    Basic = 1,
    Enhanced = 2,
    Maximum = 3,
}

impl SecurityLevel {
    pub const ALL: [SecurityLevel; 3] = [
        SecurityLevel::Basic,
        SecurityLevel::Enhanced,
        SecurityLevel::Maximum,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            SecurityLevel::Basic => "basic",
            SecurityLevel::Enhanced => "enhanced",
            SecurityLevel::Maximum => "maximum",
        }
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(SecurityLevel::Basic),
            2 => Ok(SecurityLevel::Enhanced),
            3 => Ok(SecurityLevel::Maximum),
            other => anyhow::bail!("Security level must be 1, 2 or 3 (got {})", other),
        }
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> u8 {
        level.as_u8()
    }
}

impl FromStr for SecurityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "basic" => Ok(SecurityLevel::Basic),
            "2" | "enhanced" => Ok(SecurityLevel::Enhanced),
            "3" | "maximum" | "max" => Ok(SecurityLevel::Maximum),
            other => anyhow::bail!("Unknown security level '{}'", other),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_u8(), self.label())
    }
}

/// Which part of a configuration a group belongs to. Ordering is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Base,
    Enhanced,
    Maximum,
    Technology,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Base => "Base security",
            Category::Enhanced => "Enhanced security",
            Category::Maximum => "Maximum security",
            Category::Technology => "Technology",
        }
    }
}

/// Where the hook runtime gets a tool from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRef {
    Remote { repo: String, rev: String },
    Local,
}

impl SourceRef {
    pub fn remote(repo: &str, rev: &str) -> Self {
        SourceRef::Remote {
            repo: repo.to_string(),
            rev: rev.to_string(),
        }
    }
}

/// How a detector decides something is a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchMode {
    /// Search file contents line by line for any of the patterns
    Content {
        patterns: &'static [&'static str],
        case_insensitive: bool,
        /// File name globs to search; empty means every file
        include: &'static [&'static str],
    },
    /// Report files whose name matches any of the globs (case-insensitive)
    FileName {
        globs: &'static [&'static str],
        reason: &'static str,
    },
}

/// A read-only native scanner, defined once and rendered per platform dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectorSpec {
    /// Subject used in the failure banner (`[FAIL] <title> detected`)
    pub title: &'static str,
    /// Printed when there are no findings
    pub success: &'static str,
    pub mode: MatchMode,
}

/// How the hook runtime runs a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Invocation {
    /// A hook published by the remote repository under the group identifier
    Plugin,
    /// A platform-neutral command run by the given runtime language
    Command { entry: String, language: String },
    /// A native detector rendered as a platform-specific shell command
    Detector(DetectorSpec),
}

/// An installable tool version constraint (`package>=version`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Requirement {
    pub package: String,
    pub version: String,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>={}", self.package, self.version)
    }
}

/// One security or quality tool in a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolGroup {
    pub identifier: String,
    pub display_name: String,
    pub source: SourceRef,
    pub invocation: Invocation,
    pub files: Option<String>,
    pub exclude: Option<String>,
    pub args: Vec<String>,
    pub required_level: SecurityLevel,
    pub category: Category,
    pub package: Option<Requirement>,
}

impl ToolGroup {
    /// A hook published by a remote repository
    pub fn plugin(identifier: &str, display_name: &str, repo: &str, rev: &str) -> Self {
        Self::new(identifier, display_name, SourceRef::remote(repo, rev), Invocation::Plugin)
    }

    /// A local command hook
    pub fn command(identifier: &str, display_name: &str, entry: &str, language: &str) -> Self {
        Self::new(
            identifier,
            display_name,
            SourceRef::Local,
            Invocation::Command {
                entry: entry.to_string(),
                language: language.to_string(),
            },
        )
    }

    /// A local native detector
    pub fn detector(identifier: &str, display_name: &str, spec: DetectorSpec) -> Self {
        Self::new(identifier, display_name, SourceRef::Local, Invocation::Detector(spec))
    }

    fn new(identifier: &str, display_name: &str, source: SourceRef, invocation: Invocation) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: display_name.to_string(),
            source,
            invocation,
            files: None,
            exclude: None,
            args: vec![],
            required_level: SecurityLevel::Basic,
            category: Category::Technology,
            package: None,
        }
    }

    pub fn files(mut self, pattern: &str) -> Self {
        self.files = Some(pattern.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.exclude = Some(pattern.to_string());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn level(mut self, level: SecurityLevel) -> Self {
        self.required_level = level;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn package(mut self, package: &str, version: &str) -> Self {
        self.package = Some(Requirement {
            package: package.to_string(),
            version: version.to_string(),
        });
        self
    }

    pub fn is_detector(&self) -> bool {
        matches!(self.invocation, Invocation::Detector(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_level_parsing() {
        assert_eq!("1".parse::<SecurityLevel>().unwrap(), SecurityLevel::Basic);
        assert_eq!("enhanced".parse::<SecurityLevel>().unwrap(), SecurityLevel::Enhanced);
        assert_eq!("MAX".parse::<SecurityLevel>().unwrap(), SecurityLevel::Maximum);
        assert!("4".parse::<SecurityLevel>().is_err());
        assert!(SecurityLevel::try_from(0).is_err());
        assert_eq!(SecurityLevel::try_from(3).unwrap(), SecurityLevel::Maximum);
    }

    #[test]
    fn test_security_levels_are_ordered() {
        assert!(SecurityLevel::Basic < SecurityLevel::Enhanced);
        assert!(SecurityLevel::Enhanced < SecurityLevel::Maximum);
        assert_eq!(SecurityLevel::Maximum.as_u8(), 3);
    }

    #[test]
    fn test_categories_are_ordered() {
        assert!(Category::Base < Category::Enhanced);
        assert!(Category::Enhanced < Category::Maximum);
        assert!(Category::Maximum < Category::Technology);
    }

    #[test]
    fn test_requirement_display() {
        let group = ToolGroup::plugin("black", "Black", "https://github.com/psf/black", "23.12.1")
            .package("black", "23.12.1");
        assert_eq!(group.package.unwrap().to_string(), "black>=23.12.1");
    }

    #[test]
    fn test_builder_defaults() {
        let group = ToolGroup::command("clippy", "Clippy", "cargo clippy", "system");
        assert_eq!(group.source, SourceRef::Local);
        assert_eq!(group.required_level, SecurityLevel::Basic);
        assert_eq!(group.category, Category::Technology);
        assert!(group.args.is_empty());
        assert!(!group.is_detector());
    }
}
