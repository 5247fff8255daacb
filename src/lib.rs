//! Skillet library — dockerized Moodle dev environments from recipe files.
//!
//! Exposes the core components for integration testing and programmatic use.
//! The binary entrypoint is in `main.rs`.

pub mod behat;
pub mod cli;
pub mod docker;
pub mod recipe;
