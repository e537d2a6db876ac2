//! Geographic location and solar position.
//!
//! The location is validated once at startup and never changes afterwards, so
//! everything in [`solar`] can assume in-range coordinates.

pub mod solar;

use std::fmt;

use crate::error::CalculationError;

/// Observer position on Earth in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Build a location, rejecting out-of-range or NaN coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CalculationError> {
        // `contains` is false for NaN, so this also rejects NaN.
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CalculationError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CalculationError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}
