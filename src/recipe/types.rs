//! Core recipe types.

use serde::{Deserialize, Serialize};

/// A recipe describes one project instance: which Moodle plugins it carries
/// and which optional features (acceptance testing, PHPUnit) are enabled.
///
/// Container names are derived from `container_prefix`: the application
/// container is `<prefix>-moodle`, the browser container is
/// `<prefix>-behat-<browser>`, and they share `<prefix>-network`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Human-readable project name.
    pub name: String,
    /// Prefix for all container and network names.
    pub container_prefix: String,
    /// Frankenstyle names of the plugins this instance develops.
    pub plugins: Vec<String>,
    /// Whether the behat acceptance-testing environment is enabled.
    pub include_behat: bool,
    /// Whether the PHPUnit test environment is enabled.
    pub include_phpunit: bool,
}

impl Recipe {
    pub fn moodle_container(&self) -> String {
        format!("{}-moodle", self.container_prefix)
    }

    pub fn behat_container(&self, browser: &str) -> String {
        format!("{}-behat-{}", self.container_prefix, browser)
    }

    pub fn network(&self) -> String {
        format!("{}-network", self.container_prefix)
    }
}
