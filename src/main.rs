//! Skillet — dockerized Moodle dev environments from recipe files.
//!
//! Quick start:
//!   skillet check          # validate the recipe for this project
//!   skillet behat          # run the acceptance tests in the containers
//!   skillet config         # render the Moodle config.php
//!
//! For more info: skillet --help

mod behat;
mod cli;
mod docker;
mod recipe;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// Skillet — cook Moodle dev environments from recipe files.
///
/// A recipe describes one project instance: its plugins and which optional
/// features (acceptance testing, PHPUnit) are enabled. Skillet drives the
/// project's docker containers from that recipe.
#[derive(Parser)]
#[command(
    name = "skillet",
    version,
    about = "Dockerized Moodle dev environments from recipe files",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run behat acceptance tests against the plugins in the recipe
    Behat {
        /// Specific feature file to run
        feature: Option<String>,

        /// Plugin frankenstyle names to test, comma-separated.
        /// Omit to run against all plugins.
        #[arg(short, long, value_delimiter = ',')]
        plugins: Vec<String>,

        /// Limit tests to features and steps with specific tags — e.g. @javascript
        #[arg(long)]
        tags: Option<String>,

        /// Output more information
        #[arg(short, long)]
        verbose: bool,

        /// Path to the recipe file
        #[arg(short, long, default_value = recipe::DEFAULT_RECIPE)]
        recipe: PathBuf,
    },

    /// Validate and lint a recipe file
    Check {
        /// Path to the recipe file
        #[arg(default_value = recipe::DEFAULT_RECIPE)]
        recipe: PathBuf,
    },

    /// Render the Moodle config.php for a recipe
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to the recipe file
        #[arg(short, long, default_value = recipe::DEFAULT_RECIPE)]
        recipe: PathBuf,
    },
}

fn main() {
    // Keep output clean by default; RUST_LOG=skillet=debug shows the
    // docker command lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillet=warn".parse().unwrap()),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Behat {
            feature,
            plugins,
            tags,
            verbose,
            recipe,
        } => cli::behat::run_behat(cli::behat::BehatOptions {
            recipe_path: recipe,
            feature_file: feature,
            plugins,
            tags,
            verbose,
        })
        .map(Some),

        Commands::Check { recipe } => cli::check::run_check(&recipe).map(|_| None),

        Commands::Config { output, recipe } => {
            cli::config::run_config(&recipe, output.as_deref()).map(|_| None)
        }
    };

    match result {
        // The test run's exit code belongs to the caller.
        Ok(Some(code)) if code != 0 => std::process::exit(code),
        Ok(_) => {}
        Err(e) => {
            eprintln!();
            eprintln!("  {} {}", "✗".red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {} {}", "caused by:".dimmed(), cause);
            }
            eprintln!();
            std::process::exit(1);
        }
    }
}
