//! Command-line argument parsing.
//!
//! Parsing is done by clap; the result is reduced to a single [`CliAction`]
//! so `main` only has to match on what to do.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "screenburn", version, about)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable detailed debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Log display changes instead of running any tools
    #[arg(long)]
    pub dry_run: bool,

    /// Print the current sun position, target temperature and break cadence
    #[arg(short, long, conflicts_with_all = ["test", "blank_test"])]
    pub status: bool,

    /// Apply a single color temperature and exit
    #[arg(short, long, value_name = "KELVIN", conflicts_with = "blank_test")]
    pub test: Option<u32>,

    /// Blank the screen for one break duration, then restore it
    #[arg(short, long)]
    pub blank_test: bool,
}

/// What the process should do after parsing.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the daemon
    Run {
        debug_enabled: bool,
        dry_run: bool,
        config: Option<PathBuf>,
    },
    /// Print a one-shot status report
    Status { config: Option<PathBuf> },
    /// Apply one temperature through the configured tool
    Test {
        debug_enabled: bool,
        temperature: u32,
        config: Option<PathBuf>,
    },
    /// Exercise the blank/restore path once
    BlankTest {
        debug_enabled: bool,
        dry_run: bool,
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn into_action(self) -> CliAction {
        let Cli {
            config,
            debug,
            dry_run,
            status,
            test,
            blank_test,
        } = self;

        if status {
            CliAction::Status { config }
        } else if let Some(temperature) = test {
            CliAction::Test {
                debug_enabled: debug,
                temperature,
                config,
            }
        } else if blank_test {
            CliAction::BlankTest {
                debug_enabled: debug,
                dry_run,
                config,
            }
        } else {
            CliAction::Run {
                debug_enabled: debug,
                dry_run,
                config,
            }
        }
    }
}

/// Parse an argument list (including the program name) into an action.
pub fn parse_action<I, S>(args: I) -> Result<CliAction, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map(Cli::into_action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(
            parse_action(["screenburn"]).unwrap(),
            CliAction::Run {
                debug_enabled: false,
                dry_run: false,
                config: None
            }
        );
    }

    #[test]
    fn test_parse_run_flags() {
        assert_eq!(
            parse_action(["screenburn", "-d", "--dry-run", "--config", "/tmp/s.toml"]).unwrap(),
            CliAction::Run {
                debug_enabled: true,
                dry_run: true,
                config: Some(PathBuf::from("/tmp/s.toml"))
            }
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_action(["screenburn", "--status"]).unwrap(),
            CliAction::Status { config: None }
        );
    }

    #[test]
    fn test_parse_test_temperature() {
        assert_eq!(
            parse_action(["screenburn", "--test", "4000", "--debug"]).unwrap(),
            CliAction::Test {
                debug_enabled: true,
                temperature: 4000,
                config: None
            }
        );
    }

    #[test]
    fn test_parse_test_requires_number() {
        assert!(parse_action(["screenburn", "--test", "warm"]).is_err());
        assert!(parse_action(["screenburn", "--test"]).is_err());
    }

    #[test]
    fn test_parse_blank_test() {
        assert_eq!(
            parse_action(["screenburn", "-b", "--dry-run"]).unwrap(),
            CliAction::BlankTest {
                debug_enabled: false,
                dry_run: true,
                config: None
            }
        );
    }

    #[test]
    fn test_conflicting_commands_are_rejected() {
        assert!(parse_action(["screenburn", "--status", "--test", "4000"]).is_err());
        assert!(parse_action(["screenburn", "--test", "4000", "--blank-test"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(parse_action(["screenburn", "--geo"]).is_err());
    }
}
