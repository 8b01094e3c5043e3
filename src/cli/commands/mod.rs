//! Command implementations for the stackguard CLI

pub mod detect;
pub mod generate;
pub mod init;
pub mod report;
