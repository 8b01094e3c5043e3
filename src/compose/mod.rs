//! Rule composition
//!
//! Turns a detected [`TagSet`] and a [`SecurityLevel`] into an ordered
//! [`Configuration`]: base security first, then enhanced, then maximum, then
//! technology groups in rule order. The first occurrence of an identifier
//! wins; later duplicates are dropped.

pub mod catalog;
pub mod detectors;
pub mod groups;

#[cfg(test)]
mod tests;

use crate::detect::TagSet;
use serde::Serialize;
use std::collections::HashSet;

pub use catalog::{Catalog, TechnologyRule};
pub use groups::{
    Category, DetectorSpec, Invocation, MatchMode, Requirement, SecurityLevel, SourceRef, ToolGroup,
};

/// Ordered tool groups composed for one project
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    pub tags: TagSet,
    pub level: SecurityLevel,
    pub groups: Vec<ToolGroup>,
}

impl Configuration {
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.identifier.as_str())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers().any(|id| id == identifier)
    }

    pub fn groups_in(&self, category: Category) -> impl Iterator<Item = &ToolGroup> {
        self.groups.iter().filter(move |g| g.category == category)
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.groups_in(category).count()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Composes configurations from a catalog
#[derive(Debug, Clone, Default)]
pub struct Composer {
    catalog: Catalog,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn compose(&self, tags: &TagSet, level: SecurityLevel) -> Configuration {
        let mut candidates: Vec<&ToolGroup> = Vec::new();

        candidates.extend(self.catalog.base.iter());

        if level >= SecurityLevel::Enhanced {
            candidates.extend(self.catalog.enhanced.iter().filter(|g| g.required_level <= level));
        }

        if level == SecurityLevel::Maximum {
            candidates.extend(self.catalog.maximum.iter());
        }

        for rule in &self.catalog.technology {
            if !tags.contains_any(rule.any_of) {
                continue;
            }
            tracing::debug!("Technology rule '{}' applies", rule.name);
            candidates.extend(rule.groups.iter().filter(|g| g.required_level <= level));
        }

        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(candidates.len());
        for group in candidates {
            if seen.insert(group.identifier.as_str()) {
                groups.push(group.clone());
            } else {
                tracing::debug!("Dropping duplicate tool group '{}'", group.identifier);
            }
        }

        Configuration {
            tags: tags.clone(),
            level,
            groups,
        }
    }
}

/// Compose with the built-in catalog
pub fn compose(tags: &TagSet, level: SecurityLevel) -> Configuration {
    Composer::new().compose(tags, level)
}
