//! Utility functions shared across the codebase.
//!
//! Interpolation helpers for the temperature ramp, duration formatting for
//! log output, and path shortening for user-facing messages.

use std::path::Path;
use std::time::Duration;

/// Interpolate between two u32 values based on progress (0.0 to 1.0).
///
/// Progress is clamped, and the result is rounded to the nearest integer, so
/// the output never leaves the `[start, end]` interval.
///
/// # Examples
/// ```
/// use screenburn::utils::interpolate_u32;
/// assert_eq!(interpolate_u32(1000, 2000, 0.5), 1500);
/// assert_eq!(interpolate_u32(6000, 3000, 0.25), 5250);
/// ```
pub fn interpolate_u32(start: u32, end: u32, progress: f64) -> u32 {
    let start_f = start as f64;
    let end_f = end as f64;
    let result = start_f + (end_f - start_f) * progress.clamp(0.0, 1.0);
    result.round() as u32
}

/// Position of `value` between `low` and `high` as a fraction in [0.0, 1.0].
///
/// # Examples
/// ```
/// use screenburn::utils::progress_between;
/// assert_eq!(progress_between(-6.0, 6.0, 0.0), 0.5);
/// assert_eq!(progress_between(-6.0, 6.0, 20.0), 1.0);
/// ```
pub fn progress_between(low: f64, high: f64, value: f64) -> f64 {
    if high <= low {
        return if value >= high { 1.0 } else { 0.0 };
    }
    ((value - low) / (high - low)).clamp(0.0, 1.0)
}

/// Human-friendly rendering of a duration, e.g. `20m 0s` or `45s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Replace the home directory prefix of a path with `~` for display.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
