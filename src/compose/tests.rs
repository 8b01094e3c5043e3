//! Composer tests

use super::catalog::technology_rules;
use super::*;
use crate::detect::TagSet;
use std::collections::HashSet;

fn tags(items: &[&str]) -> TagSet {
    TagSet::from_iter(items.iter().copied())
}

/// Generic, each rule's trigger tags, and everything at once
fn tag_fixtures() -> Vec<TagSet> {
    let mut fixtures = vec![TagSet::generic()];
    let mut everything = TagSet::new();
    for rule in technology_rules() {
        fixtures.push(tags(rule.any_of));
        for tag in rule.any_of {
            everything.insert(*tag);
        }
    }
    fixtures.push(everything);
    fixtures
}

#[test]
fn test_base_groups_always_first() {
    for tag_set in tag_fixtures() {
        for level in SecurityLevel::ALL {
            let config = compose(&tag_set, level);
            let ids: Vec<_> = config.identifiers().take(2).collect();
            assert_eq!(ids, vec!["gitleaks", "trufflehog"], "level {level}, tags {tag_set}");
        }
    }
}

#[test]
fn test_category_ordering_invariant() {
    for tag_set in tag_fixtures() {
        for level in SecurityLevel::ALL {
            let config = compose(&tag_set, level);
            let categories: Vec<_> = config.groups.iter().map(|g| g.category).collect();
            let mut sorted = categories.clone();
            sorted.sort();
            assert_eq!(categories, sorted, "level {level}, tags {tag_set}");
        }
    }
}

#[test]
fn test_no_duplicate_identifiers() {
    for tag_set in tag_fixtures() {
        for level in SecurityLevel::ALL {
            let config = compose(&tag_set, level);
            let unique: HashSet<_> = config.identifiers().collect();
            assert_eq!(unique.len(), config.len(), "level {level}, tags {tag_set}");
        }
    }
}

#[test]
fn test_completeness_floor_for_generic_project() {
    let config = compose(&TagSet::generic(), SecurityLevel::Basic);
    assert_eq!(config.count_in(Category::Base), 2);
    assert_eq!(config.count_in(Category::Technology), 0);
}

#[test]
fn test_level_gates_security_categories() {
    let generic = TagSet::generic();

    let basic = compose(&generic, SecurityLevel::Basic);
    assert_eq!(basic.count_in(Category::Enhanced), 0);
    assert_eq!(basic.count_in(Category::Maximum), 0);

    let enhanced = compose(&generic, SecurityLevel::Enhanced);
    assert!(enhanced.contains("detect-secrets"));
    assert!(enhanced.contains("python-safety-dependencies-check"));
    assert!(enhanced.contains("check-added-large-files"));
    assert_eq!(enhanced.count_in(Category::Maximum), 0);

    let maximum = compose(&generic, SecurityLevel::Maximum);
    assert_eq!(maximum.count_in(Category::Maximum), 6);
    assert!(maximum.groups_in(Category::Maximum).all(|g| g.is_detector()));
}

#[test]
fn test_python_at_enhanced_level() {
    let config = compose(&tags(&["python"]), SecurityLevel::Enhanced);

    assert!(config.contains("black"));
    assert!(config.contains("bandit"));
    assert!(!config.contains("mypy"));
    assert!(!config.contains("eslint"));
    assert!(!config.contains("prettier"));
}

#[test]
fn test_react_typescript_has_single_linter() {
    let config = compose(&tags(&["nodejs", "typescript", "react"]), SecurityLevel::Maximum);

    let linters: Vec<_> = config.groups.iter().filter(|g| g.identifier == "eslint").collect();
    assert_eq!(linters.len(), 1);
    assert_eq!(linters[0].files.as_deref(), Some(r"\.(js|jsx|ts|tsx)$"));
}

#[test]
fn test_python_and_sql_independently_gated() {
    let both = compose(&tags(&["python", "sql"]), SecurityLevel::Enhanced);
    assert!(both.contains("bandit"));
    assert!(both.contains("sqlfluff-lint"));

    let sql_only = compose(&tags(&["sql"]), SecurityLevel::Enhanced);
    assert!(sql_only.contains("sqlfluff-lint"));
    assert!(!sql_only.contains("bandit"));
}

#[test]
fn test_basic_level_keeps_unconditional_technology_groups() {
    let config = compose(&tags(&["python", "nodejs"]), SecurityLevel::Basic);
    let ids: Vec<_> = config.identifiers().collect();

    assert_eq!(
        ids,
        vec!["gitleaks", "trufflehog", "eslint", "bandit", "flake8"]
    );
    assert_eq!(config.count_in(Category::Maximum), 0);
}

#[test]
fn test_technology_sub_tools_gated_by_level() {
    let python = tags(&["python"]);
    assert!(!compose(&python, SecurityLevel::Basic).contains("black"));
    assert!(compose(&python, SecurityLevel::Enhanced).contains("black"));
    assert!(!compose(&python, SecurityLevel::Enhanced).contains("mypy"));
    assert!(compose(&python, SecurityLevel::Maximum).contains("mypy"));
}

#[test]
fn test_technology_groups_follow_rule_order() {
    let config = compose(&tags(&["sql", "python", "nodejs"]), SecurityLevel::Basic);
    let tech: Vec<_> = config
        .groups_in(Category::Technology)
        .map(|g| g.identifier.as_str())
        .collect();
    assert_eq!(tech, vec!["eslint", "bandit", "flake8", "sqlfluff-lint"]);
}

#[test]
fn test_configurations_grow_with_level() {
    for tag_set in tag_fixtures() {
        let basic: HashSet<_> = compose(&tag_set, SecurityLevel::Basic)
            .identifiers()
            .map(String::from)
            .collect();
        let enhanced: HashSet<_> = compose(&tag_set, SecurityLevel::Enhanced)
            .identifiers()
            .map(String::from)
            .collect();
        let maximum: HashSet<_> = compose(&tag_set, SecurityLevel::Maximum)
            .identifiers()
            .map(String::from)
            .collect();
        assert!(basic.is_subset(&enhanced));
        assert!(enhanced.is_subset(&maximum));
    }
}

#[test]
fn test_duplicate_identifier_keeps_first_occurrence() {
    let mut catalog = Catalog::default();
    catalog.technology.push(TechnologyRule {
        name: "shadow",
        any_of: &["python"],
        groups: vec![
            ToolGroup::plugin("gitleaks", "Shadowing gitleaks", "https://example.invalid/gitleaks", "v0")
                .category(Category::Technology),
        ],
    });

    let config = Composer::with_catalog(catalog).compose(&tags(&["python"]), SecurityLevel::Basic);
    let gitleaks: Vec<_> = config.groups.iter().filter(|g| g.identifier == "gitleaks").collect();

    assert_eq!(gitleaks.len(), 1);
    assert_eq!(gitleaks[0].category, Category::Base);
    assert_eq!(gitleaks[0].display_name, "Detect hardcoded secrets");
}

#[test]
fn test_catalog_identifiers_are_unique() {
    let catalog = Catalog::default();
    let mut seen = HashSet::new();
    let all = catalog
        .base
        .iter()
        .chain(&catalog.enhanced)
        .chain(&catalog.maximum)
        .chain(catalog.technology.iter().flat_map(|r| r.groups.iter()));
    for group in all {
        assert!(seen.insert(group.identifier.clone()), "duplicate {}", group.identifier);
    }
}

#[test]
fn test_configuration_records_inputs() {
    let input = tags(&["go"]);
    let config = compose(&input, SecurityLevel::Enhanced);
    assert_eq!(config.tags, input);
    assert_eq!(config.level, SecurityLevel::Enhanced);
    assert!(config.contains("go-fmt"));
}
