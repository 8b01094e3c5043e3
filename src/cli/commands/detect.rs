use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::report;
use crate::cli::CommandContext;
use crate::compose::{Category, SecurityLevel};
use crate::generate::{Generator, Plan};
use crate::scanner::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Security level used to list the groups that would be generated
    #[arg(short, long, value_name = "LEVEL", default_value = "3")]
    pub level: SecurityLevel,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct DetectReport<'a> {
    root: PathBuf,
    tags: Vec<&'a str>,
    evidence: &'a BTreeMap<String, Signal>,
    signal_counts: BTreeMap<&'static str, usize>,
    level: SecurityLevel,
    groups: Vec<GroupSummary<'a>>,
    manifest: Vec<String>,
    written: bool,
}

#[derive(Serialize)]
struct GroupSummary<'a> {
    identifier: &'a str,
    name: &'a str,
    category: Category,
}

impl<'a> DetectReport<'a> {
    fn new(root: PathBuf, plan: &'a Plan) -> Self {
        let detection = &plan.detection;
        let signal_counts = detection
            .signals
            .iter()
            .fold(BTreeMap::new(), |mut counts, signal| {
                *counts.entry(signal.kind.as_str()).or_insert(0) += 1;
                counts
            });

        Self {
            root,
            tags: detection.tags().iter().collect(),
            evidence: &detection.classification.evidence,
            signal_counts,
            level: plan.configuration.level,
            groups: plan
                .configuration
                .groups
                .iter()
                .map(|g| GroupSummary {
                    identifier: &g.identifier,
                    name: &g.display_name,
                    category: g.category,
                })
                .collect(),
            manifest: plan
                .rendered
                .manifest
                .requirements()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            written: false,
        }
    }
}

/// Detection only; never writes either artifact
pub async fn execute(args: DetectArgs, ctx: &CommandContext) -> Result<()> {
    let generator = Generator::from_config(&ctx.config, None)?;
    let plan = generator.plan(ctx.root(), args.level)?;

    match args.format {
        OutputFormat::Json => {
            let report = DetectReport::new(ctx.root.clone(), &plan);
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize detection report")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            report::print_detection(&ctx.output, &plan.detection);
            report::print_configuration(&ctx.output, &plan.configuration);
            ctx.output.blank_line();
            ctx.output.info("Detection only: no files were written");
        }
    }

    Ok(())
}
