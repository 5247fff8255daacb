//! `skillet check` — validate and lint a recipe file.

use crate::recipe::{self, linter};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Run the `skillet check` command.
pub fn run_check(recipe_path: &Path) -> Result<()> {
    let recipe_path = recipe::resolve_recipe_path(recipe_path);
    let recipe = recipe::parser::parse_recipe_file(&recipe_path)?;

    println!();
    println!("  {} Recipe is valid!", "✓".green().bold());
    println!("  Name:    {}", recipe.name.cyan());
    println!("  Prefix:  {}", recipe.container_prefix.cyan());
    println!(
        "  Behat:   {}   PHPUnit: {}",
        on_off(recipe.include_behat),
        on_off(recipe.include_phpunit)
    );
    if recipe.plugins.is_empty() {
        println!("  Plugins: {}", "none".dimmed());
    } else {
        println!("  Plugins:");
        for plugin in &recipe.plugins {
            println!("    • {plugin}");
        }
    }

    let warnings = linter::lint_recipe(&recipe);
    if warnings.is_empty() {
        println!();
        println!("  {} No issues found — recipe looks solid.", "✓".green());
    } else {
        println!();
        println!(
            "  {} {} {}:",
            "─".repeat(20).dimmed(),
            warnings.len(),
            if warnings.len() == 1 {
                "suggestion"
            } else {
                "suggestions"
            }
        );
        println!();
        for warning in &warnings {
            println!("{}", warning.display());
        }
    }

    println!();
    Ok(())
}

fn on_off(enabled: bool) -> String {
    if enabled {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}
