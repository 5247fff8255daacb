//! Parsing of the behat init script's output.
//!
//! `admin/tool/behat/cli/init.php` prints free-form progress text and, on
//! success, an announcement line followed by the exact command to run the
//! tests with. The wording is owned by Moodle and can change between
//! releases, so the matching strategy lives entirely behind
//! [`parse_init_output`] — orchestration code only ever sees the extracted
//! run command or a typed failure.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// The relative behat binary path the init script prints its run command with.
pub const RUN_COMMAND_PREFIX: &str = "vendor/bin/behat";

/// The success line the init script prints right before the run command.
static SUCCESS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Acceptance tests environment enabled on (.+), to run the tests use:")
        .expect("hard-coded pattern compiles")
});

#[derive(Debug, Error)]
pub enum InitParseError {
    /// The captured output did not contain the success announcement, or the
    /// announcement was not followed by a runnable command. Carries the full
    /// output so the operator can diagnose the remote failure.
    #[error("behat initialization seems to have failed:\n{output}")]
    InitFailed { output: String },
}

/// Case-insensitive check that a line starts with `vendor/bin/behat`.
///
/// Only the fast path below needs case-insensitivity; the follow-on line
/// check after the announcement is case-sensitive.
fn starts_with_run_command(line: &str) -> bool {
    line.get(..RUN_COMMAND_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RUN_COMMAND_PREFIX))
}

/// Extract the behat run command from the init script's captured output.
///
/// Fast path: if the trimmed output already starts with `vendor/bin/behat`,
/// the first line is the run command. Otherwise the success announcement is
/// located and the immediately following line must be the run command. An
/// announcement with no follow-on line is a defined failure, not a panic.
pub fn parse_init_output(output: &str) -> Result<String, InitParseError> {
    let init_failed = || InitParseError::InitFailed {
        output: output.to_string(),
    };

    let trimmed = output.trim();
    if starts_with_run_command(trimmed) {
        let first_line = trimmed.lines().next().unwrap_or(trimmed);
        return Ok(first_line.trim().to_string());
    }

    let matched = SUCCESS_LINE.find(output).ok_or_else(init_failed)?;
    let announcement = matched.as_str().trim();

    let lines: Vec<&str> = output.lines().map(str::trim).collect();
    let pos = lines
        .iter()
        .position(|line| *line == announcement)
        .ok_or_else(init_failed)?;

    let run_line = lines.get(pos + 1).copied().ok_or_else(init_failed)?;
    if !run_line.starts_with(RUN_COMMAND_PREFIX) {
        return Err(init_failed());
    }

    Ok(run_line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT_OUTPUT: &str = "\
Installing Behat requirements...
Updating composer dependencies
Acceptance tests environment enabled on http://moodle.local, to run the tests use:
vendor/bin/behat --config /var/behatdata/behatrun/behat/behat.yml
";

    #[test]
    fn test_extracts_run_command_after_announcement() {
        let cmd = parse_init_output(INIT_OUTPUT).unwrap();
        assert_eq!(
            cmd,
            "vendor/bin/behat --config /var/behatdata/behatrun/behat/behat.yml"
        );
    }

    #[test]
    fn test_fast_path_first_line_is_run_command() {
        let output = "vendor/bin/behat --config /tmp/behat.yml\nsome trailing noise";
        let cmd = parse_init_output(output).unwrap();
        assert_eq!(cmd, "vendor/bin/behat --config /tmp/behat.yml");
    }

    #[test]
    fn test_fast_path_is_case_insensitive() {
        let output = "Vendor/Bin/Behat --config /tmp/behat.yml";
        let cmd = parse_init_output(output).unwrap();
        assert_eq!(cmd, "Vendor/Bin/Behat --config /tmp/behat.yml");
    }

    #[test]
    fn test_fast_path_tolerates_leading_whitespace() {
        let output = "\n  vendor/bin/behat --config /tmp/behat.yml\n";
        let cmd = parse_init_output(output).unwrap();
        assert_eq!(cmd, "vendor/bin/behat --config /tmp/behat.yml");
    }

    #[test]
    fn test_missing_announcement_fails_with_full_output() {
        let output = "PHP Fatal error: something exploded";
        let err = parse_init_output(output).unwrap_err();
        assert!(err.to_string().contains("PHP Fatal error: something exploded"));
    }

    #[test]
    fn test_announcement_as_last_line_is_a_failure() {
        let output =
            "Acceptance tests environment enabled on http://moodle.local, to run the tests use:";
        let err = parse_init_output(output).unwrap_err();
        assert!(matches!(err, InitParseError::InitFailed { .. }));
    }

    #[test]
    fn test_announcement_followed_by_wrong_line_fails() {
        let output = "\
Acceptance tests environment enabled on http://moodle.local, to run the tests use:
rm -rf / # definitely not behat
";
        assert!(parse_init_output(output).is_err());
    }

    #[test]
    fn test_follow_on_line_check_is_case_sensitive() {
        let output = "\
Acceptance tests environment enabled on http://moodle.local, to run the tests use:
VENDOR/BIN/BEHAT --config /tmp/behat.yml
";
        assert!(parse_init_output(output).is_err());
    }

    #[test]
    fn test_no_trailing_newline() {
        let output = "\
Acceptance tests environment enabled on http://moodle.local, to run the tests use:
vendor/bin/behat --config /tmp/behat.yml";
        let cmd = parse_init_output(output).unwrap();
        assert_eq!(cmd, "vendor/bin/behat --config /tmp/behat.yml");
    }

    #[test]
    fn test_indented_run_command_is_trimmed() {
        let output = "\
Acceptance tests environment enabled on http://moodle.local, to run the tests use:
    vendor/bin/behat --config /tmp/behat.yml
";
        let cmd = parse_init_output(output).unwrap();
        assert_eq!(cmd, "vendor/bin/behat --config /tmp/behat.yml");
    }

    #[test]
    fn test_announcement_case_is_sensitive() {
        let output = "\
ACCEPTANCE TESTS ENVIRONMENT ENABLED on http://moodle.local, TO RUN THE TESTS USE:
vendor/bin/behat --config /tmp/behat.yml
";
        assert!(parse_init_output(output).is_err());
    }
}
