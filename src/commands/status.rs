//! Implementation of the --status command.
//!
//! Prints where the sun is right now, the temperature the daemon would apply
//! and the break cadence, without touching the display.

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use std::path::Path;

use crate::config::Config;
use crate::control::ControlLoop;
use crate::logger::Log;
use crate::utils::format_duration;

/// Lines of the status report for `now`.
pub fn status_lines<Tz: TimeZone>(control: &ControlLoop, now: &DateTime<Tz>) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let (elevation, target) = control.target(now);
    let range = control.range();
    let band = control.band();

    let phase = if elevation <= band.low_elevation() {
        "night"
    } else if elevation >= band.high_elevation() {
        "day"
    } else {
        "transition"
    };

    let mut lines = vec![
        format!("Time: {}", now.format("%Y-%m-%d %H:%M:%S %:z")),
        format!("Location: {}", control.location()),
        format!("Sun elevation: {:.2}° ({})", elevation, phase),
        format!(
            "Target temperature: {}K (night {}K, day {}K)",
            target,
            range.night_temperature(),
            range.day_temperature()
        ),
    ];

    match control.breaks() {
        Some(breaks) => lines.push(format!(
            "Breaks: {} every {}",
            format_duration(breaks.break_duration()),
            format_duration(breaks.active_duration())
        )),
        None => lines.push("Breaks: disabled".to_string()),
    }

    lines
}

/// Handle the --status command.
pub fn handle_status_command(config_path: Option<&Path>) -> Result<()> {
    Log::log_version();

    let (config, _) = Config::load_with_override(config_path)?;
    let control = ControlLoop::from_config(&config)?;

    Log::log_block_start("Current status");
    for line in status_lines(&control, &Local::now()) {
        Log::log_indented(&line);
    }

    Log::log_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaks::BreakConfig;
    use crate::geo::Location;
    use crate::temperature::{TemperatureRange, TransitionBand};
    use chrono::Utc;

    fn equator_loop(breaks: Option<BreakConfig>) -> ControlLoop {
        ControlLoop::new(
            Location::new(0.0, 0.0).unwrap(),
            TemperatureRange::new(6500, 3400).unwrap(),
            TransitionBand::default(),
            breaks,
        )
    }

    #[test]
    fn test_status_at_noon_reports_day() {
        let noon = Utc.with_ymd_and_hms(2024, 3, 21, 12, 0, 0).unwrap();
        let lines = status_lines(&equator_loop(Some(BreakConfig::default())), &noon);

        assert!(lines.iter().any(|l| l.contains("(day)")));
        assert!(lines.iter().any(|l| l.starts_with("Target temperature: 6500K")));
        assert!(lines.iter().any(|l| l == "Breaks: 20s every 20m 0s"));
    }

    #[test]
    fn test_status_at_midnight_reports_night() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 21, 0, 0, 0).unwrap();
        let lines = status_lines(&equator_loop(None), &midnight);

        assert!(lines.iter().any(|l| l.contains("(night)")));
        assert!(lines.iter().any(|l| l.starts_with("Target temperature: 3400K")));
        assert!(lines.iter().any(|l| l == "Breaks: disabled"));
    }
}
