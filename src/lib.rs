//! # stackguard
//!
//! Detects the technology stack of a project and generates a pre-commit
//! security configuration tuned to it.
//!
//! The pipeline runs one way:
//!
//! 1. [`scanner`] walks the tree and records presence signals
//! 2. [`detect`] maps signals to technology tags
//! 3. [`compose`] picks tool groups for the tags and a security level
//! 4. [`render`] produces `.pre-commit-config.yaml` and `requirements-precommit.txt`
//!
//! [`generate`] ties the stages together and owns writing the two files.
//!
//! ## Quick Start
//!
//! ```bash
//! # Detect and write a maximum-level configuration
//! stackguard
//!
//! # See what would be generated, without writing
//! stackguard detect --level 2
//!
//! # Explicit level and command dialect
//! stackguard generate --level 2 --platform windows
//! ```

pub mod cli;
pub mod compose;
pub mod config;
pub mod detect;
pub mod generate;
pub mod render;
pub mod scanner;

pub use cli::{Cli, Output};
pub use config::StackguardConfig;

/// Result type alias for stackguard operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
