//! The per-tick control logic.
//!
//! [`ControlLoop`] holds the immutable inputs (location, temperature range,
//! transition band, break cadence). Everything that changes between ticks
//! lives in a single [`LoopState`] that is moved into [`ControlLoop::tick`]
//! and handed back out. The tick takes the wall-clock time and the monotonic
//! delta as arguments, so it can be driven from tests with synthetic time.
//!
//! ## One tick
//!
//! 1. Solar elevation for `now`, then the target temperature.
//! 2. If the screen is on and the target differs from what was last applied
//!    successfully, apply it.
//! 3. Advance the break scheduler by `delta`. Its phase says whether the
//!    screen should be blanked; if the display disagrees, toggle it.
//!
//! Display failures are logged and counted, and the next tick simply tries
//! again. A failed blank or restore is retried because the display state is
//! compared against the scheduler phase each tick rather than only at the
//! moment of transition.

use std::time::Duration;

use chrono::{DateTime, TimeZone};

use anyhow::Result;

use crate::breaks::{BreakAction, BreakConfig, BreakScheduler};
use crate::config::Config;
use crate::constants::{NEUTRAL_TEMP, SLEEP_DETECTION_THRESHOLD_SECS, STATUS_LOG_EVERY_TICKS};
use crate::display::DisplayController;
use crate::geo::{Location, solar};
use crate::logger::Log;
use crate::temperature::{self, TemperatureRange, TransitionBand};
use crate::utils::format_duration;

/// Mutable state carried from one tick to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopState {
    scheduler: Option<BreakScheduler>,
    applied_temperature: Option<u32>,
    screen_blanked: bool,
    ticks: u64,
    display_failures: u64,
}

impl LoopState {
    /// Temperature most recently applied without error.
    pub fn applied_temperature(&self) -> Option<u32> {
        self.applied_temperature
    }

    /// Whether the display was last successfully switched off.
    pub fn is_screen_blanked(&self) -> bool {
        self.screen_blanked
    }

    pub fn scheduler(&self) -> Option<&BreakScheduler> {
        self.scheduler.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total failed display calls since start.
    pub fn display_failures(&self) -> u64 {
        self.display_failures
    }

    fn wants_blank(&self) -> bool {
        self.scheduler
            .as_ref()
            .is_some_and(BreakScheduler::is_on_break)
    }
}

/// What happened during a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub elevation: f64,
    pub target_temperature: u32,
    pub temperature_applied: bool,
    pub break_action: Option<BreakAction>,
    pub failures: u32,
}

#[derive(Debug, Clone)]
pub struct ControlLoop {
    location: Location,
    range: TemperatureRange,
    band: TransitionBand,
    breaks: Option<BreakConfig>,
}

impl ControlLoop {
    /// `breaks` set to `None` disables screen blanking entirely.
    pub fn new(
        location: Location,
        range: TemperatureRange,
        band: TransitionBand,
        breaks: Option<BreakConfig>,
    ) -> Self {
        Self {
            location,
            range,
            band,
            breaks,
        }
    }

    /// Build the loop from a loaded config, rejecting invalid parameters.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.location()?,
            config.temperature_range()?,
            config.transition_band()?,
            config.break_config()?,
        ))
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn range(&self) -> &TemperatureRange {
        &self.range
    }

    pub fn band(&self) -> &TransitionBand {
        &self.band
    }

    pub fn breaks(&self) -> Option<&BreakConfig> {
        self.breaks.as_ref()
    }

    /// Fresh state: active phase, nothing applied, screen on.
    pub fn initial_state(&self) -> LoopState {
        LoopState {
            scheduler: self.breaks.map(BreakScheduler::new),
            applied_temperature: None,
            screen_blanked: false,
            ticks: 0,
            display_failures: 0,
        }
    }

    /// Elevation and target temperature at `now`, without side effects.
    pub fn target<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> (f64, u32) {
        let elevation = solar::elevation(now, &self.location);
        let target = temperature::temperature(elevation, &self.range, &self.band);
        (elevation, target)
    }

    /// Run one tick of the loop.
    pub fn tick<Tz, D>(
        &self,
        mut state: LoopState,
        now: &DateTime<Tz>,
        delta: Duration,
        display: &mut D,
    ) -> (LoopState, TickReport)
    where
        Tz: TimeZone,
        D: DisplayController + ?Sized,
    {
        state.ticks += 1;

        if delta > Duration::from_secs(SLEEP_DETECTION_THRESHOLD_SECS) {
            Log::log_block_start(&format!(
                "Large time jump detected ({} minutes). System may have resumed from sleep.",
                delta.as_secs() / 60
            ));
        }

        let (elevation, target) = self.target(now);
        let mut report = TickReport {
            elevation,
            target_temperature: target,
            temperature_applied: false,
            break_action: None,
            failures: 0,
        };

        self.sync_temperature(&mut state, target, display, &mut report);

        if let Some(scheduler) = state.scheduler.as_mut() {
            report.break_action = scheduler.tick(delta);
        }
        match report.break_action {
            Some(BreakAction::Blank) => {
                Log::log_block_start(&format!(
                    "Break time: look at something far away for {}",
                    format_duration(self.break_duration())
                ));
            }
            Some(BreakAction::Restore) => {
                Log::log_block_start(&format!(
                    "Break over. Next break in {}",
                    format_duration(self.active_duration())
                ));
            }
            None => {}
        }

        self.sync_blanking(&mut state, display, &mut report);

        // Toggling the output can reset the color ramp, so the temperature is
        // re-applied as soon as the screen is back.
        if report.break_action == Some(BreakAction::Restore) && !state.screen_blanked {
            self.sync_temperature(&mut state, target, display, &mut report);
        }

        if state.ticks % STATUS_LOG_EVERY_TICKS == 0 {
            self.log_status(&state, &report);
        }

        (state, report)
    }

    /// Best-effort cleanup before exit.
    ///
    /// Turns the screen back on if a break is in progress (or a blank
    /// succeeded), and optionally resets the color temperature to neutral.
    pub fn shutdown<D>(&self, mut state: LoopState, display: &mut D, reset_temperature: bool) -> LoopState
    where
        D: DisplayController + ?Sized,
    {
        if state.screen_blanked || state.wants_blank() {
            Log::log_decorated("Restoring display output...");
            match display.set_blanked(false) {
                Ok(()) => state.screen_blanked = false,
                Err(e) => {
                    state.display_failures += 1;
                    Log::log_error(&format!("Failed to restore display output: {}", e));
                }
            }
        }

        if reset_temperature {
            Log::log_decorated(&format!("Resetting color temperature to {}K...", NEUTRAL_TEMP));
            match display.apply_temperature(NEUTRAL_TEMP) {
                Ok(()) => state.applied_temperature = Some(NEUTRAL_TEMP),
                Err(e) => {
                    state.display_failures += 1;
                    Log::log_error(&format!("Failed to reset color temperature: {}", e));
                }
            }
        }

        state
    }

    fn sync_temperature<D>(
        &self,
        state: &mut LoopState,
        target: u32,
        display: &mut D,
        report: &mut TickReport,
    ) where
        D: DisplayController + ?Sized,
    {
        if state.screen_blanked || state.applied_temperature == Some(target) {
            return;
        }

        match display.apply_temperature(target) {
            Ok(()) => {
                if state.applied_temperature.is_none() {
                    Log::log_decorated(&format!("Color temperature set to {}K", target));
                } else {
                    Log::log_verbose(&format!(
                        "Color temperature {}K (sun at {:.2}°)",
                        target, report.elevation
                    ));
                }
                state.applied_temperature = Some(target);
                report.temperature_applied = true;
            }
            Err(e) => {
                state.display_failures += 1;
                report.failures += 1;
                Log::log_warning(&format!("Failed to apply {}K: {}", target, e));
                Log::log_indented("Will retry on next tick...");
            }
        }
    }

    fn sync_blanking<D>(&self, state: &mut LoopState, display: &mut D, report: &mut TickReport)
    where
        D: DisplayController + ?Sized,
    {
        let wanted = state.wants_blank();
        if wanted == state.screen_blanked {
            return;
        }

        match display.set_blanked(wanted) {
            Ok(()) => {
                state.screen_blanked = wanted;
                if !wanted {
                    // Force a fresh apply once the output is back.
                    state.applied_temperature = None;
                }
            }
            Err(e) => {
                state.display_failures += 1;
                report.failures += 1;
                let what = if wanted { "turn the display off" } else { "turn the display back on" };
                Log::log_warning(&format!("Failed to {}: {}", what, e));
                Log::log_indented("Will retry on next tick...");
            }
        }
    }

    fn log_status(&self, state: &LoopState, report: &TickReport) {
        let breaks = match &state.scheduler {
            Some(scheduler) if scheduler.is_on_break() => {
                format!("break ends in {}", format_duration(scheduler.remaining()))
            }
            Some(scheduler) => format!("next break in {}", format_duration(scheduler.remaining())),
            None => "breaks disabled".to_string(),
        };
        Log::log_verbose(&format!(
            "Sun at {:.2}°, target {}K, {}",
            report.elevation, report.target_temperature, breaks
        ));
    }

    fn active_duration(&self) -> Duration {
        self.breaks
            .map(|b| b.active_duration())
            .unwrap_or_default()
    }

    fn break_duration(&self) -> Duration {
        self.breaks
            .map(|b| b.break_duration())
            .unwrap_or_default()
    }
}
