//! Container inventory queries via `docker ps`.
//!
//! `--format '{{json .}}'` gives one JSON object per line, which keeps the
//! parsing independent of column widths and docker's human-readable layout.

use crate::docker::exec::{args, DockerCli};
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Running,
    Stopped,
}

/// One container as reported by the runtime. Read-only; discarded after use
/// within a single command invocation.
#[derive(Debug, Clone)]
pub struct ContainerRecord {
    pub name: String,
    pub id: String,
    pub status: ContainerStatus,
}

/// A `docker ps --format '{{json .}}'` row. Only the fields we read.
#[derive(Debug, Deserialize)]
struct PsRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Names")]
    names: String,
    #[serde(rename = "State", default)]
    state: String,
}

impl From<PsRow> for ContainerRecord {
    fn from(row: PsRow) -> Self {
        let status = if row.state == "running" {
            ContainerStatus::Running
        } else {
            ContainerStatus::Stopped
        };
        ContainerRecord {
            name: row.names,
            id: row.id,
            status,
        }
    }
}

/// Containers that are currently running.
pub fn running_containers(docker: &DockerCli) -> Result<Vec<ContainerRecord>> {
    let output = docker
        .capture(&args(["ps", "--format", "{{json .}}"]))
        .context("failed to list running containers")?;
    parse_ps_output(&output)
}

/// All defined containers, stopped or running.
pub fn all_containers(docker: &DockerCli) -> Result<Vec<ContainerRecord>> {
    let output = docker
        .capture(&args(["ps", "-a", "--format", "{{json .}}"]))
        .context("failed to list containers")?;
    parse_ps_output(&output)
}

fn parse_ps_output(output: &str) -> Result<Vec<ContainerRecord>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let row: PsRow = serde_json::from_str(line)
                .with_context(|| format!("unexpected `docker ps` output line: {line}"))?;
            Ok(row.into())
        })
        .collect()
}
