//! Solar elevation from wall-clock time and location.
//!
//! A low-precision model that is plenty for driving a color ramp: a single
//! sinusoid for the declination, the two-term equation of time, and the
//! standard spherical-astronomy elevation formula. Errors are well under a
//! degree for mid latitudes, which moves the computed dusk by a minute or two.
//!
//! Every function here is pure. The same instant and location always give the
//! same result, which is what the control loop tests rely on.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::constants::{
    DEGREES_PER_HOUR, EARTH_AXIAL_TILT, MARCH_EQUINOX_DAY, MINUTES_PER_DEGREE_LONGITUDE,
};
use crate::geo::Location;

/// Solar declination in degrees for a day of the year (1-based).
pub fn solar_declination(day_of_year: u32) -> f64 {
    let angle = (360.0 / 365.0 * (day_of_year as f64 - MARCH_EQUINOX_DAY)).to_radians();
    EARTH_AXIAL_TILT * angle.sin()
}

/// Equation of time in minutes: how far apparent solar time runs ahead of
/// mean solar time on a given date.
pub fn equation_of_time(year: i32, day_of_year: u32) -> f64 {
    let d = 6.24 + 0.0172 * (365.25 * (year - 2000) as f64 + day_of_year as f64);
    -7.659 * d.sin() + 9.863 * (2.0 * d + 3.5932).sin()
}

/// Hour angle in degrees for a UTC instant at the given longitude.
///
/// Zero at local solar noon, negative in the morning, positive in the evening.
pub fn hour_angle(time: &DateTime<Utc>, longitude: f64) -> f64 {
    let utc_minutes =
        time.hour() as f64 * 60.0 + time.minute() as f64 + time.second() as f64 / 60.0;
    let correction =
        MINUTES_PER_DEGREE_LONGITUDE * longitude + equation_of_time(time.year(), time.ordinal());
    let solar_hours = (utc_minutes + correction) / 60.0;
    (solar_hours - 12.0) * DEGREES_PER_HOUR
}

/// Sun elevation above the horizon in degrees, in [-90, 90].
pub fn elevation<Tz: TimeZone>(time: &DateTime<Tz>, location: &Location) -> f64 {
    let utc = time.with_timezone(&Utc);
    let declination = solar_declination(utc.ordinal()).to_radians();
    let hour_angle = hour_angle(&utc, location.longitude()).to_radians();
    let latitude = location.latitude().to_radians();

    let sin_elevation = latitude.sin() * declination.sin()
        + latitude.cos() * declination.cos() * hour_angle.cos();

    // Rounding can push the sum a hair past ±1 near the zenith and nadir.
    sin_elevation.clamp(-1.0, 1.0).asin().to_degrees()
}
