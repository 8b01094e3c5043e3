//! Signal scanning
//!
//! Walks a project tree and records raw presence signals (marker files,
//! directories, extensions, declared dependencies) for the classifier.

pub mod core;
pub mod directory;
pub mod manifest;
pub mod types;

pub use self::core::scan;
pub use directory::DirectoryHandler;
pub use types::{ScanOptions, Signal, SignalKind, SignalSet};
