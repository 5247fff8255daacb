//! Wrappers around the container runtime's command-line interface.

pub mod exec;
pub mod inventory;
pub mod lifecycle;

pub use exec::{DockerCli, ExecError};
pub use inventory::{ContainerRecord, ContainerStatus};
pub use lifecycle::{ContainerSpec, StartupPlan};
