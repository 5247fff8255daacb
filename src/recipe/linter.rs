//! Recipe linter — advisory checks run by `skillet check`.
//!
//! Nothing here blocks a run; these are the "did you mean to do that?"
//! warnings for mistakes that otherwise only show up as confusing behat
//! behavior later (tags that match nothing, a behat command that refuses
//! to start).

use crate::recipe::types::Recipe;
use colored::Colorize;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Frankenstyle component names: `<type>_<name>`, all lowercase.
static FRANKENSTYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*_[a-z][a-z0-9_]*$").expect("hard-coded pattern compiles")
});

#[derive(Debug)]
pub enum Severity {
    /// Likely to break a workflow.
    Warning,
    /// Worth knowing, not necessarily wrong.
    Info,
}

/// A lint finding about a recipe.
#[derive(Debug)]
pub struct LintWarning {
    pub severity: Severity,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LintWarning {
    fn warn_with_fix(msg: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: msg.into(),
            suggestion: Some(fix.into()),
        }
    }

    fn info(msg: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: msg.into(),
            suggestion: None,
        }
    }

    /// Format for terminal output.
    pub fn display(&self) -> String {
        let icon = match self.severity {
            Severity::Warning => "⚠".yellow().to_string(),
            Severity::Info => "ℹ".blue().to_string(),
        };
        let mut out = format!("  {} {}", icon, self.message);
        if let Some(ref suggestion) = self.suggestion {
            out.push_str(&format!("\n    {}: {}", "Fix".green(), suggestion));
        }
        out
    }
}

/// Lint a recipe and return findings.
pub fn lint_recipe(recipe: &Recipe) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    check_plugin_names(recipe, &mut warnings);
    check_duplicate_plugins(recipe, &mut warnings);
    check_behat_enabled(recipe, &mut warnings);

    warnings
}

fn check_plugin_names(recipe: &Recipe, warnings: &mut Vec<LintWarning>) {
    for plugin in &recipe.plugins {
        if !FRANKENSTYLE.is_match(plugin) {
            warnings.push(LintWarning::warn_with_fix(
                format!("'{plugin}' does not look like a frankenstyle plugin name"),
                "use the component form, e.g. mod_fancy or local_reporting",
            ));
        }
    }
}

fn check_duplicate_plugins(recipe: &Recipe, warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();
    for plugin in &recipe.plugins {
        if !seen.insert(plugin.as_str()) {
            warnings.push(LintWarning::warn_with_fix(
                format!("plugin '{plugin}' is listed more than once"),
                "remove the duplicate entry",
            ));
        }
    }
}

fn check_behat_enabled(recipe: &Recipe, warnings: &mut Vec<LintWarning>) {
    if !recipe.include_behat {
        warnings.push(LintWarning::info(
            "include_behat is off — `skillet behat` will refuse to run for this recipe",
        ));
    }
    if recipe.include_behat && recipe.plugins.is_empty() {
        warnings.push(LintWarning::info(
            "no plugins listed — behat runs will cover the whole site unless filtered",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(plugins: &[&str], include_behat: bool) -> Recipe {
        Recipe {
            name: "test".to_string(),
            container_prefix: "test".to_string(),
            plugins: plugins.iter().map(|s| s.to_string()).collect(),
            include_behat,
            include_phpunit: false,
        }
    }

    #[test]
    fn test_clean_recipe_has_no_warnings() {
        let warnings = lint_recipe(&recipe(&["mod_fancy", "local_reporting"], true));
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_non_frankenstyle_name_flagged() {
        let warnings = lint_recipe(&recipe(&["FancyPlugin"], true));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("frankenstyle")));
    }

    #[test]
    fn test_duplicate_plugin_flagged() {
        let warnings = lint_recipe(&recipe(&["mod_fancy", "mod_fancy"], true));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("more than once")));
    }

    #[test]
    fn test_behat_disabled_noted() {
        let warnings = lint_recipe(&recipe(&["mod_fancy"], false));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("include_behat is off")));
    }

    #[test]
    fn test_empty_plugin_list_noted_when_behat_enabled() {
        let warnings = lint_recipe(&recipe(&[], true));
        assert!(warnings.iter().any(|w| w.message.contains("no plugins")));
    }
}
