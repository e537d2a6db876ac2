use proptest::prelude::*;
use std::fs;
use tempfile::tempdir;

use screenburn::config::{Config, validate_config};
use screenburn::constants::*;
use screenburn::control::ControlLoop;

fn located(latitude: f64, longitude: f64) -> Config {
    Config {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..Default::default()
    }
}

/// Render a config the way a user would write it, skipping unset keys.
fn to_toml(config: &Config) -> String {
    let mut lines = Vec::new();
    if let Some(v) = config.latitude {
        lines.push(format!("latitude = {:?}", v));
    }
    if let Some(v) = config.longitude {
        lines.push(format!("longitude = {:?}", v));
    }
    if let Some(v) = config.day_temp {
        lines.push(format!("day_temp = {}", v));
    }
    if let Some(v) = config.night_temp {
        lines.push(format!("night_temp = {}", v));
    }
    if let Some(v) = config.break_interval {
        lines.push(format!("break_interval = {}", v));
    }
    if let Some(v) = config.break_duration {
        lines.push(format!("break_duration = {}", v));
    }
    if let Some(v) = config.tick_interval {
        lines.push(format!("tick_interval = {}", v));
    }
    lines.join("\n")
}

fn load(config: &Config) -> anyhow::Result<Config> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("screenburn.toml");
    fs::write(&path, to_toml(config)).unwrap();
    Config::load_from_path(&path)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_valid_temperature_pairs_load(
        night in MINIMUM_TEMP..=MAXIMUM_TEMP,
        day in MINIMUM_TEMP..=MAXIMUM_TEMP,
    ) {
        let config = Config {
            day_temp: Some(day),
            night_temp: Some(night),
            ..located(TEST_LAT, TEST_LON)
        };

        let loaded = load(&config);
        if night <= day {
            let loaded = loaded.unwrap();
            prop_assert_eq!(loaded.day_temp, Some(day));
            prop_assert_eq!(loaded.night_temp, Some(night));
            prop_assert!(ControlLoop::from_config(&loaded).is_ok());
        } else {
            prop_assert!(loaded.is_err());
        }
    }

    #[test]
    fn test_out_of_range_temperatures_are_rejected(
        temp in prop_oneof![0u32..MINIMUM_TEMP, (MAXIMUM_TEMP + 1)..100_000],
    ) {
        let config = Config {
            day_temp: Some(temp),
            ..located(TEST_LAT, TEST_LON)
        };
        prop_assert!(load(&config).is_err());
    }

    #[test]
    fn test_break_settings_within_limits_load(
        interval in MINIMUM_BREAK_INTERVAL..=MAXIMUM_BREAK_INTERVAL,
        duration in MINIMUM_BREAK_DURATION..=MAXIMUM_BREAK_DURATION,
        tick in MINIMUM_TICK_INTERVAL..=MAXIMUM_TICK_INTERVAL,
    ) {
        let config = Config {
            break_interval: Some(interval),
            break_duration: Some(duration),
            tick_interval: Some(tick),
            ..located(TEST_LAT, TEST_LON)
        };

        let loaded = load(&config);
        if tick <= duration {
            let loaded = loaded.unwrap();
            let breaks = loaded.break_config().unwrap().unwrap();
            prop_assert_eq!(breaks.active_duration().as_secs(), interval);
            prop_assert_eq!(breaks.break_duration().as_secs(), duration);
        } else {
            prop_assert!(loaded.is_err());
        }
    }

    #[test]
    fn test_any_valid_location_loads(
        lat in -90.0f64..=90.0,
        lon in -180.0f64..=180.0,
    ) {
        let loaded = load(&located(lat, lon)).unwrap();
        let location = loaded.location().unwrap();
        prop_assert_eq!(location.latitude(), lat);
        prop_assert_eq!(location.longitude(), lon);
    }

    #[test]
    fn test_invalid_latitude_is_rejected(
        lat in prop_oneof![-1000.0f64..-90.001, 90.001f64..1000.0],
    ) {
        prop_assert!(load(&located(lat, 0.0)).is_err());
    }

    #[test]
    fn test_transition_band_order_is_enforced(
        low in -90.0f64..=90.0,
        high in -90.0f64..=90.0,
    ) {
        let config = Config {
            low_elevation: Some(low),
            high_elevation: Some(high),
            ..located(TEST_LAT, TEST_LON)
        };
        prop_assert_eq!(validate_config(&config).is_ok(), low < high);
    }
}

const TEST_LAT: f64 = 43.94;
const TEST_LON: f64 = -70.91;

#[test]
fn test_empty_file_reports_missing_location() {
    let err = load(&Config::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Missing latitude"));
}
