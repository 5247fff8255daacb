//! Behat run-command extraction and composition.

pub mod command;
pub mod init;

pub use command::{build_run_command, describe_run, effective_tags, RunFilters};
pub use init::{parse_init_output, InitParseError};
