//! Error types shared by the calculation core and the display boundary.
//!
//! Calculation errors only arise while building validated inputs at startup.
//! Display errors are the only failures the control loop sees at runtime, and
//! the loop recovers from every one of them.

use std::process::ExitStatus;

use thiserror::Error;

/// Rejected input to the solar and temperature calculations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    #[error("latitude {0} is out of range [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is out of range [-180, 180]")]
    InvalidLongitude(f64),

    #[error("night temperature {night}K is above day temperature {day}K")]
    InvertedTemperatureRange { night: u32, day: u32 },

    #[error("transition band [{low}°, {high}°] is empty or out of range")]
    InvalidTransitionBand { low: f64, high: f64 },

    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),
}

/// Failure to drive the external display tools.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The tool could not be started at all (usually not installed).
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but reported failure.
    #[error("{tool} exited with {status}{}", format_stderr(.stderr))]
    ExitStatus {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    /// No active output could be found to blank.
    #[error("no active display output found")]
    NoOutput,
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_error_messages() {
        assert_eq!(
            CalculationError::InvalidLatitude(91.0).to_string(),
            "latitude 91 is out of range [-90, 90]"
        );
        assert_eq!(
            CalculationError::InvertedTemperatureRange { night: 7000, day: 6500 }.to_string(),
            "night temperature 7000K is above day temperature 6500K"
        );
    }

    #[test]
    fn test_launch_error_names_tool() {
        let err = DisplayError::Launch {
            tool: "sct".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to launch sct"));
    }

    #[test]
    fn test_format_stderr_skips_blank_output() {
        assert_eq!(format_stderr("  \n"), "");
        assert_eq!(format_stderr("bad output\n"), ": bad output");
    }
}
