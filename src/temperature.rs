//! Mapping from solar elevation to a target color temperature.
//!
//! Below the transition band the display sits at the night temperature, above
//! it at the day temperature, and inside it the value moves linearly with the
//! sun. Because the input is the sun's elevation rather than the clock, dawn
//! and dusk stretch and shrink with the seasons on their own.

use crate::constants::{DEFAULT_HIGH_ELEVATION, DEFAULT_LOW_ELEVATION};
use crate::error::CalculationError;
use crate::utils::{interpolate_u32, progress_between};

/// Day and night color temperatures in Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureRange {
    day: u32,
    night: u32,
}

impl TemperatureRange {
    pub fn new(day_temperature: u32, night_temperature: u32) -> Result<Self, CalculationError> {
        if night_temperature > day_temperature {
            return Err(CalculationError::InvertedTemperatureRange {
                night: night_temperature,
                day: day_temperature,
            });
        }
        Ok(Self {
            day: day_temperature,
            night: night_temperature,
        })
    }

    pub fn day_temperature(&self) -> u32 {
        self.day
    }

    pub fn night_temperature(&self) -> u32 {
        self.night
    }
}

/// Elevations (degrees) where the dusk/dawn ramp starts and ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionBand {
    low: f64,
    high: f64,
}

impl TransitionBand {
    pub fn new(low_elevation: f64, high_elevation: f64) -> Result<Self, CalculationError> {
        let in_range = |e: f64| (-90.0..=90.0).contains(&e);
        if !in_range(low_elevation) || !in_range(high_elevation) || low_elevation >= high_elevation
        {
            return Err(CalculationError::InvalidTransitionBand {
                low: low_elevation,
                high: high_elevation,
            });
        }
        Ok(Self {
            low: low_elevation,
            high: high_elevation,
        })
    }

    pub fn low_elevation(&self) -> f64 {
        self.low
    }

    pub fn high_elevation(&self) -> f64 {
        self.high
    }
}

impl Default for TransitionBand {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_ELEVATION,
            high: DEFAULT_HIGH_ELEVATION,
        }
    }
}

/// Target color temperature for a sun elevation, rounded to whole Kelvin.
///
/// The result is always within `[night, day]` and never decreases as the
/// elevation grows. A NaN elevation is treated as night.
pub fn temperature(elevation: f64, range: &TemperatureRange, band: &TransitionBand) -> u32 {
    if elevation.is_nan() || elevation <= band.low {
        return range.night;
    }
    if elevation >= band.high {
        return range.day;
    }
    let progress = progress_between(band.low, band.high, elevation);
    interpolate_u32(range.night, range.day, progress)
}
