//! Building the final behat invocation from the parsed run command.
//!
//! The remote behat CLI is flag-order-sensitive: the optional feature file
//! must come last as a positional argument, so flags are appended in a fixed
//! order. Everything in this module is pure — the orchestrator decides what
//! to execute and how.

/// Browser the selenium container runs. Not configurable for now.
pub const BROWSER: &str = "chrome";

/// The behat profile every run uses.
pub const PROFILE: &str = "headlesschrome";

/// Behat binary path as printed by the init script (relative to the Moodle root).
pub const RELATIVE_BEHAT_PATH: &str = "vendor/bin/behat";

/// Absolute behat binary path inside the Moodle container.
pub const CONTAINER_BEHAT_PATH: &str = "/var/www/html/moodle/vendor/bin/behat";

/// Behat init script inside the Moodle container.
pub const INIT_SCRIPT: &str = "/var/www/html/moodle/admin/tool/behat/cli/init.php";

/// Format settings requesting expanded scenario output.
const EXPANDED_FORMAT_FLAG: &str = r#"--format-settings='{"expand": true}'"#;

/// User-supplied filters for a behat run. Constructed once from CLI input,
/// immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct RunFilters {
    /// Specific feature file to run. When set, plugin-derived tags are
    /// ignored (the caller warns about that — this module just obeys).
    pub feature_file: Option<String>,
    /// Plugin frankenstyle names, in the order the user gave them.
    pub plugins: Vec<String>,
    /// User-supplied tag expression, e.g. `@javascript`.
    pub tags: Option<String>,
    /// Request expanded output formatting.
    pub verbose: bool,
}

impl RunFilters {
    /// Plugin-derived tags only apply when no feature file was given.
    pub fn plugin_tags_apply(&self) -> bool {
        self.feature_file.is_none() && !self.plugins.is_empty()
    }
}

/// Compute the effective `--tags` expression: the user expression, with one
/// synthetic `@plugin` tag per selected plugin appended (comma-joined) when
/// they apply. `None` when there is nothing to filter on.
pub fn effective_tags(filters: &RunFilters) -> Option<String> {
    let mut tags = filters.tags.clone().unwrap_or_default();

    if filters.plugin_tags_apply() {
        let plugin_tags = filters
            .plugins
            .iter()
            .map(|name| format!("@{name}"))
            .collect::<Vec<_>>()
            .join(",");
        if tags.is_empty() {
            tags = plugin_tags;
        } else {
            tags = format!("{tags},{plugin_tags}");
        }
    }

    (!tags.is_empty()).then_some(tags)
}

/// Compose the full behat command line from the parsed base invocation.
///
/// Order matters: profile, format settings, tags, then the feature file as
/// the trailing positional argument.
pub fn build_run_command(parsed: &str, filters: &RunFilters) -> String {
    let mut cmd = parsed.replace(RELATIVE_BEHAT_PATH, CONTAINER_BEHAT_PATH);

    cmd.push_str(&format!(" --profile={PROFILE}"));
    if filters.verbose {
        cmd.push(' ');
        cmd.push_str(EXPANDED_FORMAT_FLAG);
    }
    if let Some(tags) = effective_tags(filters) {
        cmd.push_str(&format!(" --tags={tags}"));
    }
    if let Some(feature) = &filters.feature_file {
        cmd.push(' ');
        cmd.push_str(feature);
    }

    cmd
}

/// Human-readable description of what is about to run.
pub fn describe_run(filters: &RunFilters) -> String {
    let mut msg = String::from("Executing behat tests");

    if let Some(feature) = &filters.feature_file {
        msg.push_str(&format!(" for featurefile {feature}"));
        if let Some(tags) = &filters.tags {
            msg.push_str(&format!(" and tags {tags}"));
        }
    } else if !filters.plugins.is_empty() {
        msg.push_str(&format!(" for plugins {}", filters.plugins.join(",")));
        if let Some(tags) = &filters.tags {
            msg.push_str(&format!(" and tags {tags}"));
        }
    } else if let Some(tags) = &filters.tags {
        msg.push_str(&format!(" for tags {tags}"));
    }

    msg
}
