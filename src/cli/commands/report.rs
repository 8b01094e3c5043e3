//! Human-readable reports shared by the commands

use crate::cli::Output;
use crate::compose::{Category, Configuration};
use crate::generate::{Detection, Plan, WrittenArtifacts};
use crate::scanner::SignalKind;

const CATEGORIES: [Category; 4] = [
    Category::Base,
    Category::Enhanced,
    Category::Maximum,
    Category::Technology,
];

pub fn print_detection(output: &Output, detection: &Detection) {
    output.header("Detected technologies");
    let tags = detection.tags();
    if tags.is_generic() {
        output.warning("No specific technology recognized; using generic security tooling");
    }
    for tag in tags.iter() {
        match detection.classification.evidence.get(tag) {
            Some(signal) => {
                output.key_value(
                    tag,
                    &format!("{} {}", signal.kind.as_str(), signal.value),
                    false,
                );
                output.verbose(&format!("  from {}", signal.source_path.display()));
            }
            None => output.list_item(tag),
        }
    }

    output.category("Signals");
    for kind in [
        SignalKind::File,
        SignalKind::Directory,
        SignalKind::Extension,
        SignalKind::Dependency,
    ] {
        output.count(kind.as_str(), detection.signals.count_of(kind));
    }
}

pub fn print_configuration(output: &Output, configuration: &Configuration) {
    output.header(&format!("Tool groups at security level {}", configuration.level));
    for category in CATEGORIES {
        let groups: Vec<_> = configuration.groups_in(category).collect();
        if groups.is_empty() {
            continue;
        }
        output.category(&format!("{} ({})", category.label(), groups.len()));
        for group in groups {
            output.list_item(&format!("{} - {}", group.identifier, group.display_name));
        }
    }
}

/// Final report after generation
pub fn print_summary(output: &Output, plan: &Plan, written: &WrittenArtifacts) {
    let configuration = &plan.configuration;

    output.header("stackguard summary");
    output.key_value("Technologies", &configuration.tags.to_string(), true);
    output.key_value("Security level", &configuration.level.to_string(), false);
    for category in CATEGORIES {
        output.key_value(
            category.label(),
            &configuration.count_in(category).to_string(),
            false,
        );
    }
    output.key_value(
        "Manifest packages",
        &plan.rendered.manifest.requirements().len().to_string(),
        false,
    );

    output.blank_line();
    output.success(&format!("Wrote {}", written.config_path.display()));
    output.success(&format!("Wrote {}", written.manifest_path.display()));

    output.blank_line();
    let runtime_found = which::which("pre-commit").is_ok();
    output.status_indicator(
        "pre-commit",
        if runtime_found {
            "found on PATH"
        } else {
            "not found on PATH"
        },
        runtime_found,
    );

    output.category("Next steps");
    output.step(&format!("pip install -r {}", written.manifest_path.display()));
    output.step("pre-commit install");
    if configuration.contains("detect-secrets") {
        output.step("detect-secrets scan > .secrets.baseline");
    }
    output.step("pre-commit run --all-files");
}
