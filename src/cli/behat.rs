//! `skillet behat` — run acceptance tests against the recipe's containers.
//!
//! The flow:
//! 1. Load the recipe and check that behat is enabled (fatal if not)
//! 2. Make sure the selenium browser container is running
//! 3. Run the behat init script inside the Moodle container (captured)
//! 4. Extract the run command from the init output
//! 5. Compose the final command from the user's filters
//! 6. Stream the test run to the terminal and propagate its exit code
//!
//! Any stage failure aborts the rest. A freshly started browser container is
//! intentionally left running for reuse by the next invocation.

use crate::behat::{self, RunFilters};
use crate::docker::{lifecycle, ContainerSpec, DockerCli, StartupPlan};
use crate::recipe;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Options for the `skillet behat` command.
#[derive(Debug)]
pub struct BehatOptions {
    /// Path to the recipe file.
    pub recipe_path: PathBuf,
    /// Specific feature file to run.
    pub feature_file: Option<String>,
    /// Plugin frankenstyle names to filter on, in user order.
    pub plugins: Vec<String>,
    /// Tag expression, e.g. `@javascript`.
    pub tags: Option<String>,
    /// Output more information.
    pub verbose: bool,
}

/// Run the `skillet behat` command. Returns the exit code of the test run.
pub fn run_behat(options: BehatOptions) -> Result<i32> {
    let recipe_path = recipe::resolve_recipe_path(&options.recipe_path);
    let recipe = recipe::parser::parse_recipe_file(&recipe_path)?;

    // Config gate — never auto-proceed into container mutation.
    if !recipe.include_behat {
        bail!(
            "Recipe '{}' does not have include_behat set to true. \
             Enable it and rebuild the environment before running behat.",
            recipe.name
        );
    }

    let docker = DockerCli::new();
    docker
        .ensure_available()
        .context("docker is required to run behat")?;

    // Advisory only: names outside the recipe still become tags, they just
    // will not match anything.
    for plugin in &options.plugins {
        if !recipe.plugins.contains(plugin) {
            println!(
                "  {} Plugin '{}' is not listed in the recipe",
                "⚠".yellow(),
                plugin
            );
        }
    }

    ensure_browser_running(&docker, &recipe)?;

    println!("  {} Initializing behat", "→".blue());
    let moodle = recipe.moodle_container();
    let init_args = vec![
        "exec".to_string(),
        moodle.clone(),
        "php".to_string(),
        behat::command::INIT_SCRIPT.to_string(),
    ];
    let init_output = docker
        .capture_combined(&init_args)
        .context("Failed to initialize behat")?;
    if options.verbose {
        print!("{init_output}");
    }

    let parsed = behat::parse_init_output(&init_output)?;

    if options.feature_file.is_some() && !options.plugins.is_empty() {
        println!(
            "  {} NOTE — the --plugins option is ignored when a feature file is passed",
            "⚠".yellow()
        );
    }

    let filters = RunFilters {
        feature_file: options.feature_file,
        plugins: options.plugins,
        tags: options.tags,
        verbose: options.verbose,
    };
    let run_command = behat::build_run_command(&parsed, &filters);

    println!("  {} {}", "▶".green(), behat::describe_run(&filters));

    let behat_argv = shell_words::split(&run_command)
        .with_context(|| format!("Composed behat command is not splittable: {run_command}"))?;
    let mut exec_args = vec!["exec".to_string(), "-it".to_string(), moodle];
    exec_args.extend(behat_argv);

    let code = docker
        .stream(&exec_args)
        .context("Failed to execute behat tests")?;
    if code != 0 {
        println!(
            "\n  {} Behat tests failed (exit code {})",
            "⚠".yellow(),
            code
        );
    }

    Ok(code)
}

/// Bring up the selenium browser container the behat profile points at.
fn ensure_browser_running(docker: &DockerCli, recipe: &recipe::Recipe) -> Result<()> {
    let spec = ContainerSpec {
        name: recipe.behat_container(behat::command::BROWSER),
        image: format!("selenium/standalone-{}:latest", behat::command::BROWSER),
        network: recipe.network(),
        ports: vec![(4444, 4444), (7900, 7900)],
        shm_size: Some("2g".to_string()),
    };

    let plan = lifecycle::plan(docker, &spec)?;
    match &plan {
        StartupPlan::AlreadyRunning { id } => {
            println!(
                "  {} Browser container {} already running — container id = {}",
                "ℹ".blue(),
                spec.name,
                id
            );
        }
        StartupPlan::StartExisting => {
            println!(
                "  {} Starting existing docker container {}",
                "→".blue(),
                spec.name
            );
        }
        StartupPlan::CreateAndRun => {
            println!(
                "  {} Creating and starting docker container {}",
                "→".blue(),
                spec.name
            );
        }
    }

    lifecycle::apply(docker, &spec, &plan)
        .with_context(|| format!("Failed to start browser container {}", spec.name))
}
