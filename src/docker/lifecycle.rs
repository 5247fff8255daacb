//! Container startup planning and execution.
//!
//! Per container name the state machine is `absent -> created+running`,
//! `stopped -> running`, or `running -> running` (no-op). Planning is pure;
//! [`apply`] performs at most one docker invocation.

use crate::docker::exec::{args, DockerCli};
use crate::docker::inventory::{self, ContainerRecord};
use anyhow::{Context, Result};

/// Desired shape of a container we may need to create.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub network: String,
    /// `(host, container)` port pairs.
    pub ports: Vec<(u16, u16)>,
    pub shm_size: Option<String>,
}

/// How to get the container from its current state to running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupPlan {
    /// Already running — nothing to do.
    AlreadyRunning { id: String },
    /// Defined but stopped — `docker start`.
    StartExisting,
    /// Not defined at all — `docker run`.
    CreateAndRun,
}

/// Decide how to bring `name` up. Decision order: the running list first,
/// then the full inventory, then create-and-run.
pub fn plan_startup(
    name: &str,
    running: &[ContainerRecord],
    all: &[ContainerRecord],
) -> StartupPlan {
    if let Some(container) = running.iter().find(|c| c.name == name) {
        return StartupPlan::AlreadyRunning {
            id: container.id.clone(),
        };
    }
    if all.iter().any(|c| c.name == name) {
        return StartupPlan::StartExisting;
    }
    StartupPlan::CreateAndRun
}

/// Query the runtime and plan the startup for `spec`.
///
/// The full inventory is only consulted when the container is not already
/// running.
pub fn plan(docker: &DockerCli, spec: &ContainerSpec) -> Result<StartupPlan> {
    let running = inventory::running_containers(docker)?;
    if let Some(container) = running.iter().find(|c| c.name == spec.name) {
        return Ok(StartupPlan::AlreadyRunning {
            id: container.id.clone(),
        });
    }
    let all = inventory::all_containers(docker)?;
    Ok(plan_startup(&spec.name, &running, &all))
}

/// Argv for `docker start <name>`.
pub fn start_args(name: &str) -> Vec<String> {
    args(["start", name])
}

/// Argv for `docker run` creating the container described by `spec`.
pub fn run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut argv = args(["run", "--name", &spec.name]);
    argv.push(format!("--network={}", spec.network));
    argv.push("-d".to_string());
    for (host, container) in &spec.ports {
        argv.push("-p".to_string());
        argv.push(format!("{host}:{container}"));
    }
    if let Some(shm) = &spec.shm_size {
        argv.push(format!("--shm-size={shm}"));
    }
    argv.push(spec.image.clone());
    argv
}

/// Execute a startup plan. Zero or one external invocation.
pub fn apply(docker: &DockerCli, spec: &ContainerSpec, plan: &StartupPlan) -> Result<()> {
    match plan {
        StartupPlan::AlreadyRunning { .. } => Ok(()),
        StartupPlan::StartExisting => docker
            .capture(&start_args(&spec.name))
            .map(|_| ())
            .with_context(|| format!("failed to start container {}", spec.name)),
        StartupPlan::CreateAndRun => docker
            .capture(&run_args(spec))
            .map(|_| ())
            .with_context(|| format!("failed to create container {}", spec.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::inventory::ContainerStatus;

    fn record(name: &str, id: &str, status: ContainerStatus) -> ContainerRecord {
        ContainerRecord {
            name: name.to_string(),
            id: id.to_string(),
            status,
        }
    }

    fn spec() -> ContainerSpec {
        ContainerSpec {
            name: "mc-behat-chrome".to_string(),
            image: "selenium/standalone-chrome:latest".to_string(),
            network: "mc-network".to_string(),
            ports: vec![(4444, 4444), (7900, 7900)],
            shm_size: Some("2g".to_string()),
        }
    }

    #[test]
    fn test_plan_already_running() {
        let running = vec![record("mc-behat-chrome", "abc123", ContainerStatus::Running)];
        let plan = plan_startup("mc-behat-chrome", &running, &running);
        assert_eq!(
            plan,
            StartupPlan::AlreadyRunning {
                id: "abc123".to_string()
            }
        );
    }

    #[test]
    fn test_plan_start_existing_stopped_container() {
        let all = vec![record("mc-behat-chrome", "abc123", ContainerStatus::Stopped)];
        let plan = plan_startup("mc-behat-chrome", &[], &all);
        assert_eq!(plan, StartupPlan::StartExisting);
    }

    #[test]
    fn test_plan_create_when_absent() {
        let others = vec![record("mc-moodle", "def456", ContainerStatus::Running)];
        let plan = plan_startup("mc-behat-chrome", &others, &others);
        assert_eq!(plan, StartupPlan::CreateAndRun);
    }

    #[test]
    fn test_run_args_shape() {
        let argv = run_args(&spec());
        assert_eq!(
            argv,
            vec![
                "run",
                "--name",
                "mc-behat-chrome",
                "--network=mc-network",
                "-d",
                "-p",
                "4444:4444",
                "-p",
                "7900:7900",
                "--shm-size=2g",
                "selenium/standalone-chrome:latest",
            ]
        );
    }

    #[test]
    fn test_run_args_without_shm_size() {
        let mut s = spec();
        s.shm_size = None;
        s.ports.clear();
        assert_eq!(
            run_args(&s),
            vec![
                "run",
                "--name",
                "mc-behat-chrome",
                "--network=mc-network",
                "-d",
                "selenium/standalone-chrome:latest",
            ]
        );
    }

    #[test]
    fn test_start_args() {
        assert_eq!(start_args("mc-behat-chrome"), vec!["start", "mc-behat-chrome"]);
    }
}
