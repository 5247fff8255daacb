//! YAML recipe parser.
//!
//! Recipes are intentionally small — a name, a container prefix, a plugin
//! list, and feature switches. The raw form tolerates omitted fields; the
//! conversion validates what matters and fails with a pointed message.
//!
//! # Example recipe file:
//! ```yaml
//! name: course-tools
//! container_prefix: mc
//! plugins:
//!   - mod_fancy
//!   - local_reporting
//! include_behat: true
//! include_phpunit: true
//! ```

use crate::recipe::types::Recipe;
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

/// Valid docker name fragment: what we accept for `container_prefix`.
static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("hard-coded pattern compiles"));

/// Raw YAML representation before validation.
#[derive(Debug, Deserialize)]
struct RawRecipe {
    name: String,
    #[serde(default)]
    container_prefix: Option<String>,
    #[serde(default)]
    plugins: Vec<String>,
    #[serde(default)]
    include_behat: bool,
    #[serde(default)]
    include_phpunit: bool,
}

/// Parse a recipe file from a path.
pub fn parse_recipe_file(path: impl AsRef<Path>) -> Result<Recipe> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe file: {}", path.display()))?;
    parse_recipe_str(&content)
        .with_context(|| format!("Failed to parse recipe file: {}", path.display()))
}

/// Parse a YAML recipe string into a validated [`Recipe`].
pub fn parse_recipe_str(yaml: &str) -> Result<Recipe> {
    let raw: RawRecipe = serde_yaml::from_str(yaml).context("Invalid YAML syntax in recipe")?;

    if raw.name.trim().is_empty() {
        bail!("Recipe must have a non-empty 'name'");
    }

    // Prefix defaults to a lowercased name; either way it must be usable
    // as a docker container/network name fragment.
    let container_prefix = raw
        .container_prefix
        .unwrap_or_else(|| raw.name.trim().to_lowercase().replace([' ', '_'], "-"));
    if !PREFIX_PATTERN.is_match(&container_prefix) {
        bail!(
            "Invalid container_prefix '{}' — use lowercase letters, digits, and dashes",
            container_prefix
        );
    }

    let plugins: Vec<String> = raw
        .plugins
        .iter()
        .map(|p| p.trim().to_string())
        .collect();
    if plugins.iter().any(|p| p.is_empty()) {
        bail!("Recipe plugin list contains an empty name");
    }

    Ok(Recipe {
        name: raw.name.trim().to_string(),
        container_prefix,
        plugins,
        include_behat: raw.include_behat,
        include_phpunit: raw.include_phpunit,
    })
}
