//! Configuration loading, defaults and validation.
//!
//! screenburn reads `screenburn.toml` from `$XDG_CONFIG_HOME/screenburn/`
//! (usually `~/.config/screenburn/screenburn.toml`), or from a path passed
//! with `--config`. A commented default file is written on first run.
//!
//! ```toml
//! #[Location]
//! latitude = 43.94                 # Degrees, north positive
//! longitude = -70.91               # Degrees, east positive
//!
//! #[Color temperature]
//! day_temp = 6500                  # Kelvin with the sun up
//! night_temp = 3400                # Kelvin after dusk
//! low_elevation = -6.0             # Sun elevation where night begins
//! high_elevation = 6.0             # Sun elevation where day begins
//!
//! #[Breaks]
//! breaks_enabled = true
//! break_interval = 1200            # Seconds of screen time between breaks
//! break_duration = 20              # Seconds the screen stays off
//!
//! #[Tools]
//! temperature_command = "sct"      # Called as `<command> <kelvin>`
//! output = "eDP-1"                 # xrandr output to blank (auto-detected)
//! tick_interval = 2                # Seconds between updates
//! reset_on_exit = true             # Restore 6500K when exiting
//! ```
//!
//! Every key except the location is optional. Values are range-checked after
//! parsing and converted into the validated core types (`Location`,
//! `TemperatureRange`, `TransitionBand`, `BreakConfig`) before the loop starts,
//! so a bad config stops the program at startup and never mid-run.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::breaks::BreakConfig;
use crate::constants::*;
use crate::geo::Location;
use crate::logger::Log;
use crate::temperature::{TemperatureRange, TransitionBand};
use crate::utils::{format_duration, path_for_display};

/// Settings for screenburn, as read from `screenburn.toml`.
///
/// Missing optional fields are filled in by [`Config::load_from_path`].
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub day_temp: Option<u32>,
    pub night_temp: Option<u32>,
    pub low_elevation: Option<f64>,  // degrees
    pub high_elevation: Option<f64>, // degrees
    pub breaks_enabled: Option<bool>,
    pub break_interval: Option<u64>, // seconds
    pub break_duration: Option<u64>, // seconds
    pub tick_interval: Option<u64>,  // seconds

    /// Tool that sets the color temperature; the Kelvin value is appended.
    pub temperature_command: Option<String>,

    /// xrandr output name to blank. Detected from the active monitors when unset.
    pub output: Option<String>,

    /// Reset the color temperature to neutral when exiting.
    pub reset_on_exit: Option<bool>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("screenburn").join("screenburn.toml"))
    }

    /// Load the config from the default location, creating it if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)
                .context("Failed to create default config during load")?;
            Log::log_block_start(&format!(
                "Created default configuration at {}",
                path_for_display(&config_path)
            ));
        }

        Self::load_from_path(&config_path).with_context(|| {
            Log::log_pipe();
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    /// Load from `--config` when given, otherwise from the default location.
    ///
    /// Returns the path that was read alongside the config, for logging.
    pub fn load_with_override(custom_path: Option<&Path>) -> Result<(Self, PathBuf)> {
        match custom_path {
            Some(path) => Ok((Self::load_from_path(path)?, path.to_path_buf())),
            None => Ok((Self::load()?, Self::get_config_path()?)),
        }
    }

    /// Load and validate a config file at an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Self::apply_defaults_and_validate_fields(&mut config)?;
        validate_config(&config)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Write a commented default configuration.
    ///
    /// The location lines are left commented out: there is no sensible
    /// default, and loading fails until the user fills them in.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = ConfigBuilder::new()
            .add_section("Location")
            .add_commented_setting("latitude", "0.0", "Degrees, north positive (required)")
            .add_commented_setting("longitude", "0.0", "Degrees, east positive (required)")
            .add_section("Color temperature")
            .add_setting("day_temp", &DEFAULT_DAY_TEMP.to_string(), "Kelvin with the sun up")
            .add_setting("night_temp", &DEFAULT_NIGHT_TEMP.to_string(), "Kelvin after dusk")
            .add_setting(
                "low_elevation",
                &format!("{:.1}", DEFAULT_LOW_ELEVATION),
                "Sun elevation (degrees) where night begins",
            )
            .add_setting(
                "high_elevation",
                &format!("{:.1}", DEFAULT_HIGH_ELEVATION),
                "Sun elevation (degrees) where day begins",
            )
            .add_section("Breaks")
            .add_setting(
                "breaks_enabled",
                &DEFAULT_BREAKS_ENABLED.to_string(),
                "Blank the screen periodically (20-20-20 rule)",
            )
            .add_setting(
                "break_interval",
                &DEFAULT_BREAK_INTERVAL.to_string(),
                &format!(
                    "Seconds of screen time between breaks ({}-{})",
                    MINIMUM_BREAK_INTERVAL, MAXIMUM_BREAK_INTERVAL
                ),
            )
            .add_setting(
                "break_duration",
                &DEFAULT_BREAK_DURATION.to_string(),
                &format!(
                    "Seconds the screen stays off ({}-{})",
                    MINIMUM_BREAK_DURATION, MAXIMUM_BREAK_DURATION
                ),
            )
            .add_section("Tools")
            .add_setting(
                "temperature_command",
                &format!("\"{}\"", DEFAULT_TEMPERATURE_COMMAND),
                "Called as `<command> <kelvin>`",
            )
            .add_commented_setting("output", "\"eDP-1\"", "xrandr output to blank (auto-detected)")
            .add_setting(
                "tick_interval",
                &DEFAULT_TICK_INTERVAL.to_string(),
                &format!(
                    "Seconds between updates ({}-{})",
                    MINIMUM_TICK_INTERVAL, MAXIMUM_TICK_INTERVAL
                ),
            )
            .add_setting(
                "reset_on_exit",
                &DEFAULT_RESET_ON_EXIT.to_string(),
                &format!("Restore {}K when exiting", NEUTRAL_TEMP),
            )
            .build();

        fs::write(path, content)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        Ok(())
    }

    fn apply_defaults_and_validate_fields(config: &mut Config) -> Result<()> {
        // Validate latitude range (-90 to 90)
        match config.latitude {
            Some(lat) if !(-90.0..=90.0).contains(&lat) => {
                anyhow::bail!("Latitude must be between -90 and 90 degrees (got {})", lat);
            }
            Some(_) => {}
            None => anyhow::bail!("Missing latitude. Set your location in the config file"),
        }

        // Validate longitude range (-180 to 180)
        match config.longitude {
            Some(lon) if !(-180.0..=180.0).contains(&lon) => {
                anyhow::bail!(
                    "Longitude must be between -180 and 180 degrees (got {})",
                    lon
                );
            }
            Some(_) => {}
            None => anyhow::bail!("Missing longitude. Set your location in the config file"),
        }

        if let Some(temp) = config.day_temp {
            if !(MINIMUM_TEMP..=MAXIMUM_TEMP).contains(&temp) {
                anyhow::bail!(
                    "Day temperature must be between {} and {} Kelvin",
                    MINIMUM_TEMP,
                    MAXIMUM_TEMP
                );
            }
        } else {
            config.day_temp = Some(DEFAULT_DAY_TEMP);
        }

        if let Some(temp) = config.night_temp {
            if !(MINIMUM_TEMP..=MAXIMUM_TEMP).contains(&temp) {
                anyhow::bail!(
                    "Night temperature must be between {} and {} Kelvin",
                    MINIMUM_TEMP,
                    MAXIMUM_TEMP
                );
            }
        } else {
            config.night_temp = Some(DEFAULT_NIGHT_TEMP);
        }

        if config.low_elevation.is_none() {
            config.low_elevation = Some(DEFAULT_LOW_ELEVATION);
        }
        if config.high_elevation.is_none() {
            config.high_elevation = Some(DEFAULT_HIGH_ELEVATION);
        }

        if config.breaks_enabled.is_none() {
            config.breaks_enabled = Some(DEFAULT_BREAKS_ENABLED);
        }

        if let Some(interval) = config.break_interval {
            if !(MINIMUM_BREAK_INTERVAL..=MAXIMUM_BREAK_INTERVAL).contains(&interval) {
                anyhow::bail!(
                    "Break interval must be between {} and {} seconds",
                    MINIMUM_BREAK_INTERVAL,
                    MAXIMUM_BREAK_INTERVAL
                );
            }
        } else {
            config.break_interval = Some(DEFAULT_BREAK_INTERVAL);
        }

        if let Some(duration) = config.break_duration {
            if !(MINIMUM_BREAK_DURATION..=MAXIMUM_BREAK_DURATION).contains(&duration) {
                anyhow::bail!(
                    "Break duration must be between {} and {} seconds",
                    MINIMUM_BREAK_DURATION,
                    MAXIMUM_BREAK_DURATION
                );
            }
        } else {
            config.break_duration = Some(DEFAULT_BREAK_DURATION);
        }

        if let Some(interval) = config.tick_interval {
            if !(MINIMUM_TICK_INTERVAL..=MAXIMUM_TICK_INTERVAL).contains(&interval) {
                anyhow::bail!(
                    "Tick interval must be between {} and {} seconds",
                    MINIMUM_TICK_INTERVAL,
                    MAXIMUM_TICK_INTERVAL
                );
            }
        } else {
            config.tick_interval = Some(DEFAULT_TICK_INTERVAL);
        }

        match config.temperature_command.as_deref() {
            Some(command) if command.trim().is_empty() => {
                anyhow::bail!("temperature_command must not be empty");
            }
            Some(_) => {}
            None => config.temperature_command = Some(DEFAULT_TEMPERATURE_COMMAND.to_string()),
        }

        if config.reset_on_exit.is_none() {
            config.reset_on_exit = Some(DEFAULT_RESET_ON_EXIT);
        }

        Ok(())
    }

    // ═══ Conversions into the validated core types ═══

    pub fn location(&self) -> Result<Location> {
        let (lat, lon) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => anyhow::bail!("Location is not configured"),
        };
        Ok(Location::new(lat, lon)?)
    }

    pub fn temperature_range(&self) -> Result<TemperatureRange> {
        Ok(TemperatureRange::new(
            self.day_temp.unwrap_or(DEFAULT_DAY_TEMP),
            self.night_temp.unwrap_or(DEFAULT_NIGHT_TEMP),
        )?)
    }

    pub fn transition_band(&self) -> Result<TransitionBand> {
        Ok(TransitionBand::new(
            self.low_elevation.unwrap_or(DEFAULT_LOW_ELEVATION),
            self.high_elevation.unwrap_or(DEFAULT_HIGH_ELEVATION),
        )?)
    }

    /// Break cadence, or `None` when breaks are disabled.
    pub fn break_config(&self) -> Result<Option<BreakConfig>> {
        if !self.breaks_enabled.unwrap_or(DEFAULT_BREAKS_ENABLED) {
            return Ok(None);
        }
        Ok(Some(BreakConfig::new(
            Duration::from_secs(self.break_interval.unwrap_or(DEFAULT_BREAK_INTERVAL)),
            Duration::from_secs(self.break_duration.unwrap_or(DEFAULT_BREAK_DURATION)),
        )?))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL))
    }

    pub fn log_config(&self, path: &Path) {
        Log::log_block_start(&format!(
            "Loaded configuration from {}",
            path_for_display(path)
        ));

        if let Ok(location) = self.location() {
            Log::log_indented(&format!("Location: {}", location));
        }
        Log::log_indented(&format!(
            "Day temperature: {}K",
            self.day_temp.unwrap_or(DEFAULT_DAY_TEMP)
        ));
        Log::log_indented(&format!(
            "Night temperature: {}K",
            self.night_temp.unwrap_or(DEFAULT_NIGHT_TEMP)
        ));
        Log::log_indented(&format!(
            "Transition band: {:.1}° to {:.1}°",
            self.low_elevation.unwrap_or(DEFAULT_LOW_ELEVATION),
            self.high_elevation.unwrap_or(DEFAULT_HIGH_ELEVATION)
        ));

        if self.breaks_enabled.unwrap_or(DEFAULT_BREAKS_ENABLED) {
            Log::log_indented(&format!(
                "Breaks: {} every {}",
                format_duration(Duration::from_secs(
                    self.break_duration.unwrap_or(DEFAULT_BREAK_DURATION)
                )),
                format_duration(Duration::from_secs(
                    self.break_interval.unwrap_or(DEFAULT_BREAK_INTERVAL)
                ))
            ));
        } else {
            Log::log_indented("Breaks: disabled");
        }

        Log::log_indented(&format!(
            "Temperature command: {}",
            self.temperature_command
                .as_deref()
                .unwrap_or(DEFAULT_TEMPERATURE_COMMAND)
        ));
        Log::log_indented(&format!(
            "Output: {}",
            self.output.as_deref().unwrap_or("auto-detect")
        ));
        Log::log_indented(&format!(
            "Update interval: {} seconds",
            self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL)
        ));
    }
}

/// Cross-field checks that single-field range validation cannot catch.
pub fn validate_config(config: &Config) -> Result<()> {
    config.location()?;

    let day = config.day_temp.unwrap_or(DEFAULT_DAY_TEMP);
    let night = config.night_temp.unwrap_or(DEFAULT_NIGHT_TEMP);
    if night > day {
        anyhow::bail!(
            "Night temperature ({}K) must not be higher than day temperature ({}K)",
            night,
            day
        );
    }

    let low = config.low_elevation.unwrap_or(DEFAULT_LOW_ELEVATION);
    let high = config.high_elevation.unwrap_or(DEFAULT_HIGH_ELEVATION);
    config.transition_band().with_context(|| {
        format!(
            "low_elevation ({}) must be below high_elevation ({}), both within ±90°",
            low, high
        )
    })?;

    let tick = config.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL);
    let break_duration = config.break_duration.unwrap_or(DEFAULT_BREAK_DURATION);
    if config.breaks_enabled.unwrap_or(DEFAULT_BREAKS_ENABLED) && tick > break_duration {
        anyhow::bail!(
            "Tick interval ({}s) must not exceed the break duration ({}s)",
            tick,
            break_duration
        );
    }

    Ok(())
}

/// Builds the aligned, commented default config file.
struct ConfigBuilder {
    entries: Vec<Entry>,
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{}]", title)));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    /// A setting the user has to opt into by removing the leading `#`.
    fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("# {} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    fn build(self) -> String {
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Setting { line, .. } => Some(line.len()),
                Entry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for (index, entry) in self.entries.into_iter().enumerate() {
            match entry {
                Entry::Section(title) => {
                    if index > 0 {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                Entry::Setting { line, comment } => {
                    lines.push(format!("{:<width$}{}", line, comment, width = width));
                }
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}
