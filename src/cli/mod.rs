//! Command-line interface for stackguard
//!
//! Without a subcommand stackguard runs in quick mode: detect, compose at the
//! maximum security level and write both files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod commands;
mod output;

pub use output::Output;

use crate::config::{self, StackguardConfig};

#[derive(Parser)]
#[command(
    name = "stackguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Detect a project's stack and generate a tuned pre-commit security configuration",
    long_about = "stackguard scans a project for languages, frameworks and infrastructure, \
                  then writes a .pre-commit-config.yaml and a requirements-precommit.txt \
                  matched to what it found and to the requested security level (1-3)."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report detected technologies and planned tool groups without writing anything
    Detect(commands::detect::DetectArgs),
    /// Answer a few questions, then generate the configuration
    Init(commands::init::InitArgs),
    /// Generate the configuration at an explicit security level
    Generate(commands::generate::GenerateArgs),
}

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub root: PathBuf,
    pub config: StackguardConfig,
    pub output: Output,
}

impl CommandContext {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let root = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Cannot determine current directory")?,
        };
        let config = config::load(&root, self.config.as_deref())?;
        let ctx = CommandContext {
            root,
            config,
            output: Output::new(self.verbose, self.quiet),
        };

        match self.command {
            Some(Commands::Detect(args)) => commands::detect::execute(args, &ctx).await,
            Some(Commands::Init(args)) => commands::init::execute(args, &ctx).await,
            Some(Commands::Generate(args)) => commands::generate::execute(args, &ctx).await,
            None => commands::generate::quick(&ctx).await,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // Keep the walker crates quiet below trace
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
        2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
