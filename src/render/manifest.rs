use crate::compose::{Configuration, Requirement};
use std::collections::HashSet;

/// Hook runtime package, always the first manifest line
pub const RUNTIME_PACKAGE: &str = "pre-commit";

/// Installable tool constraints for a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolManifest {
    requirements: Vec<Requirement>,
}

impl ToolManifest {
    /// Runtime first, then group packages in configuration order. A package
    /// listed by several groups keeps its first constraint.
    pub fn from_configuration(configuration: &Configuration, runtime_version: &str) -> Self {
        let runtime = Requirement {
            package: RUNTIME_PACKAGE.to_string(),
            version: runtime_version.to_string(),
        };

        let mut seen = HashSet::new();
        let requirements = std::iter::once(runtime)
            .chain(configuration.groups.iter().filter_map(|g| g.package.clone()))
            .filter(|req| seen.insert(req.package.clone()))
            .collect();

        Self { requirements }
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(|r| r.package.as_str())
    }

    /// One `package>=version` per line with a trailing newline
    pub fn to_text(&self) -> String {
        self.requirements
            .iter()
            .map(|r| format!("{r}\n"))
            .collect()
    }
}
