//! Display control through external command-line tools.
//!
//! Color temperature is set by running the configured tool with the Kelvin
//! value as its last argument (`sct 3400`). Blanking uses
//! `xrandr --output <name> --off` and restoring uses `--auto`, which brings
//! the output back at its preferred mode.
//!
//! The output name is taken from the config or detected lazily from
//! `xrandr --listactivemonitors`. Detection is retried on the next call if it
//! fails, so a display server that comes up after the daemon is picked up
//! without a restart.

use std::process::{Command, Stdio};

use crate::config::Config;
use crate::constants::{DEFAULT_OUTPUT_COMMAND, DEFAULT_TEMPERATURE_COMMAND};
use crate::display::DisplayController;
use crate::error::DisplayError;
use crate::logger::Log;

pub struct CommandDisplay {
    temperature_program: String,
    temperature_args: Vec<String>,
    output_command: String,
    output: Option<String>,
}

impl CommandDisplay {
    /// Create a controller from explicit tool names.
    ///
    /// `temperature_command` may carry leading arguments (`"redshift -P -O"`);
    /// the Kelvin value is appended after them.
    pub fn new(temperature_command: &str, output_command: &str, output: Option<String>) -> Self {
        let mut words = temperature_command.split_whitespace().map(str::to_string);
        let temperature_program = words
            .next()
            .unwrap_or_else(|| DEFAULT_TEMPERATURE_COMMAND.to_string());
        Self {
            temperature_program,
            temperature_args: words.collect(),
            output_command: output_command.to_string(),
            output,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config
                .temperature_command
                .as_deref()
                .unwrap_or(DEFAULT_TEMPERATURE_COMMAND),
            DEFAULT_OUTPUT_COMMAND,
            config.output.clone(),
        )
    }

    /// Name of the output to blank, detecting and caching it on first use.
    fn output(&mut self) -> Result<String, DisplayError> {
        if let Some(name) = &self.output {
            return Ok(name.clone());
        }
        let name = detect_output(&self.output_command)?;
        Log::log_decorated(&format!("Using display output {}", name));
        self.output = Some(name.clone());
        Ok(name)
    }
}

impl DisplayController for CommandDisplay {
    fn apply_temperature(&mut self, kelvin: u32) -> Result<(), DisplayError> {
        let mut args = self.temperature_args.clone();
        args.push(kelvin.to_string());
        run_tool(&self.temperature_program, &args)
    }

    fn set_blanked(&mut self, blank: bool) -> Result<(), DisplayError> {
        let output = self.output()?;
        let mode = if blank { "--off" } else { "--auto" };
        let args = ["--output".to_string(), output, mode.to_string()];
        run_tool(&self.output_command, &args)
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Run a tool to completion, mapping launch failures and non-zero exits.
fn run_tool(program: &str, args: &[String]) -> Result<(), DisplayError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| DisplayError::Launch {
            tool: program.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(DisplayError::ExitStatus {
            tool: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Ask xrandr for the first active monitor.
pub fn detect_output(output_command: &str) -> Result<String, DisplayError> {
    let output = Command::new(output_command)
        .arg("--listactivemonitors")
        .stdin(Stdio::null())
        .output()
        .map_err(|source| DisplayError::Launch {
            tool: output_command.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(DisplayError::ExitStatus {
            tool: output_command.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    parse_active_monitors(&String::from_utf8_lossy(&output.stdout)).ok_or(DisplayError::NoOutput)
}

/// Extract the first output name from `xrandr --listactivemonitors`.
///
/// ```text
/// Monitors: 2
///  0: +*eDP-1 1920/344x1080/194+0+0  eDP-1
///  1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1
/// ```
pub fn parse_active_monitors(listing: &str) -> Option<String> {
    listing
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Monitors:"))
        .nth(1)
        .and_then(|line| line.split_whitespace().last())
        .map(str::to_string)
}

/// Whether `program` can be found on `PATH`.
pub fn is_tool_available(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "Monitors: 2\n 0: +*eDP-1 1920/344x1080/194+0+0  eDP-1\n 1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1\n";

    #[test]
    fn test_parse_active_monitors_picks_first() {
        assert_eq!(parse_active_monitors(LISTING), Some("eDP-1".to_string()));
    }

    #[test]
    fn test_parse_active_monitors_empty() {
        assert_eq!(parse_active_monitors("Monitors: 0\n"), None);
        assert_eq!(parse_active_monitors(""), None);
    }

    #[test]
    fn test_apply_temperature_success() {
        let mut display = CommandDisplay::new("true", "true", Some("eDP-1".to_string()));
        assert!(display.apply_temperature(3400).is_ok());
        // Idempotent: a repeated value is just another successful call.
        assert!(display.apply_temperature(3400).is_ok());
    }

    #[test]
    fn test_apply_temperature_nonzero_exit() {
        let mut display = CommandDisplay::new("false", "true", Some("eDP-1".to_string()));
        let err = display.apply_temperature(3400).unwrap_err();
        assert!(matches!(err, DisplayError::ExitStatus { ref tool, .. } if tool == "false"));
    }

    #[test]
    fn test_missing_tool_is_launch_error() {
        let mut display = CommandDisplay::new(
            "screenburn-no-such-tool",
            "screenburn-no-such-tool",
            None,
        );
        assert!(matches!(
            display.apply_temperature(3400),
            Err(DisplayError::Launch { .. })
        ));
        assert!(matches!(
            display.set_blanked(true),
            Err(DisplayError::Launch { .. })
        ));
    }

    #[test]
    fn test_set_blanked_with_configured_output() {
        let mut display = CommandDisplay::new("true", "true", Some("eDP-1".to_string()));
        assert!(display.set_blanked(true).is_ok());
        assert!(display.set_blanked(false).is_ok());
    }

    #[test]
    fn test_empty_temperature_command_falls_back_to_default() {
        let display = CommandDisplay::new("   ", "xrandr", None);
        assert_eq!(display.temperature_program, "sct");
        assert!(display.temperature_args.is_empty());
    }

    #[test]
    fn test_temperature_command_keeps_leading_arguments() {
        let display = CommandDisplay::new("redshift -P -O", "xrandr", None);
        assert_eq!(display.temperature_program, "redshift");
        assert_eq!(display.temperature_args, vec!["-P", "-O"]);
    }
}
