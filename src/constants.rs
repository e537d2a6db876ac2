//! Application constants and default values for screenburn.
//!
//! This module contains the configuration defaults, validation limits,
//! and operational constants used throughout the application.

// ═══ Application Configuration Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_DAY_TEMP: u32 = 6500; // Kelvin - close to natural sunlight
pub const DEFAULT_NIGHT_TEMP: u32 = 3400; // Kelvin - warm, comfortable for night viewing
pub const DEFAULT_LOW_ELEVATION: f64 = -6.0; // degrees - end of civil twilight
pub const DEFAULT_HIGH_ELEVATION: f64 = 6.0; // degrees - sun clear of the horizon
pub const DEFAULT_BREAK_INTERVAL: u64 = 20 * 60; // seconds of screen time between breaks
pub const DEFAULT_BREAK_DURATION: u64 = 20; // seconds the screen stays blanked
pub const DEFAULT_TICK_INTERVAL: u64 = 2; // seconds between control loop ticks
pub const DEFAULT_BREAKS_ENABLED: bool = true;
pub const DEFAULT_RESET_ON_EXIT: bool = true;
pub const DEFAULT_TEMPERATURE_COMMAND: &str = "sct";
pub const DEFAULT_OUTPUT_COMMAND: &str = "xrandr";
pub const NEUTRAL_TEMP: u32 = 6500; // Kelvin - uncorrected white point restored on exit

// ═══ Validation Limits ═══
// These limits ensure user inputs are within reasonable and safe ranges

// Temperature limits (Kelvin scale)
pub const MINIMUM_TEMP: u32 = 1000; // Very warm candlelight-like
pub const MAXIMUM_TEMP: u32 = 20000; // Very cool blue light

// Break cadence limits
pub const MINIMUM_BREAK_INTERVAL: u64 = 60; // seconds
pub const MAXIMUM_BREAK_INTERVAL: u64 = 4 * 60 * 60; // seconds (4 hours)
pub const MINIMUM_BREAK_DURATION: u64 = 5; // seconds
pub const MAXIMUM_BREAK_DURATION: u64 = 10 * 60; // seconds

// Tick interval limits
pub const MINIMUM_TICK_INTERVAL: u64 = 1; // seconds
pub const MAXIMUM_TICK_INTERVAL: u64 = 60; // seconds (break timing gets coarse beyond this)

// ═══ Solar Model Constants ═══

pub const EARTH_AXIAL_TILT: f64 = 23.44; // degrees
pub const MARCH_EQUINOX_DAY: f64 = 81.0; // day of year the declination crosses zero
pub const MINUTES_PER_DEGREE_LONGITUDE: f64 = 4.0; // 360 degrees in 24 hours
pub const DEGREES_PER_HOUR: f64 = 15.0;

// ═══ Operational Timing Constants ═══

pub const SLEEP_DETECTION_THRESHOLD_SECS: u64 = 300; // 5 minutes - detect system sleep/resume
pub const CHECK_INTERVAL_SECS: u64 = 1; // How often to check the running flag during sleep
pub const STATUS_LOG_EVERY_TICKS: u64 = 300; // Periodic status line in debug mode

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1; // General failure

// ═══ Test Constants ═══
// Common values used in tests for consistency
#[cfg(test)]
pub mod test_constants {
    use super::*;

    pub const TEST_LATITUDE: f64 = 43.94;
    pub const TEST_LONGITUDE: f64 = -70.91;
    pub const TEST_DAY_TEMP: u32 = DEFAULT_DAY_TEMP; // 6500K
    pub const TEST_NIGHT_TEMP: u32 = DEFAULT_NIGHT_TEMP; // 3400K
    pub const TEST_BREAK_INTERVAL: u64 = DEFAULT_BREAK_INTERVAL; // 1200s
    pub const TEST_BREAK_DURATION: u64 = DEFAULT_BREAK_DURATION; // 20s
}
