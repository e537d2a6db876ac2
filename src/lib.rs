//! # screenburn
//!
//! Sun-tracking color temperature and 20-20-20 screen breaks for X11 desktops.
//!
//! screenburn computes the sun's elevation for a fixed location, maps it to a
//! color temperature between a configured night and day value, and applies it
//! through an external tool. Every 20 minutes it switches the screen off for
//! 20 seconds so you look away.
//!
//! ## Architecture
//!
//! - **geo**: Location type and solar elevation math
//! - **temperature**: Elevation to Kelvin mapping
//! - **breaks**: Work/break phase scheduler
//! - **control**: Per-tick orchestration of the above against a display
//! - **display**: Display controller trait, command-line and dry-run backends
//! - **ticker**: Fixed-interval loop with cancellation
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants and defaults
//! - **logger**: Structured logging with visual formatting
//! - **lock**, **signals**: Single instance and graceful shutdown
//! - **commands**: One-shot `--status`, `--test` and `--blank-test` handlers

pub mod args;
pub mod breaks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod control;
pub mod display;
pub mod error;
pub mod geo;
pub mod lock;
pub mod logger;
pub mod signals;
pub mod temperature;
pub mod ticker;
pub mod utils;

// Re-export important types for easier access
pub use breaks::{BreakAction, BreakConfig, BreakPhase, BreakScheduler};
pub use config::Config;
pub use control::{ControlLoop, LoopState, TickReport};
pub use display::{CommandDisplay, DisplayController, DryRunDisplay};
pub use error::{CalculationError, DisplayError};
pub use geo::Location;
pub use logger::{Log, LogLevel};
pub use temperature::{TemperatureRange, TransitionBand};
pub use ticker::CancellationToken;
