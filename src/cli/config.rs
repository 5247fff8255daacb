//! `skillet config` — render the Moodle config.php for a recipe.
//!
//! The rendered file reads its actual values from environment variables that
//! the containers inject; the recipe only decides which optional blocks are
//! present. Prints to stdout by default so it can be piped or inspected.

use crate::recipe::{self, config_php};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Run the `skillet config` command.
pub fn run_config(recipe_path: &Path, output: Option<&Path>) -> Result<()> {
    let recipe_path = recipe::resolve_recipe_path(recipe_path);
    let recipe = recipe::parser::parse_recipe_file(&recipe_path)?;
    let rendered = config_php::render(&recipe);

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
            println!();
            println!(
                "  {} Wrote {}",
                "✓".green().bold(),
                path.display().to_string().bold()
            );
            if recipe.include_phpunit {
                println!("  {} PHPUnit block included", "ℹ".blue());
            }
            println!();
        }
        None => {
            print!("{rendered}");
        }
    }

    Ok(())
}
