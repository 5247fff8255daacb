//! CLI command implementations.

pub mod behat;
pub mod check;
pub mod config;
