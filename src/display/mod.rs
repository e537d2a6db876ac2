//! Display control abstraction.
//!
//! The control loop never touches the screen directly. It asks a
//! [`DisplayController`] to set a color temperature or to switch the output
//! off and back on, and treats every failure as recoverable.
//!
//! ## Implementations
//!
//! - **[`CommandDisplay`]**: shells out to a color temperature tool (`sct` by
//!   default) and to `xrandr` for output toggling
//! - **[`DryRunDisplay`]**: only logs what would have been done, for trying a
//!   configuration without touching the screen

use crate::config::Config;
use crate::error::DisplayError;

pub mod command;
pub mod dry_run;

pub use command::CommandDisplay;
pub use dry_run::DryRunDisplay;

/// Anything that can change screen color temperature and blank the screen.
///
/// Calls are made one at a time from the control loop thread. Applying the
/// same value twice must succeed and leave the display in the same state.
pub trait DisplayController {
    /// Set the display white point to `kelvin`.
    fn apply_temperature(&mut self, kelvin: u32) -> Result<(), DisplayError>;

    /// Turn the display output off (`true`) or back on (`false`).
    fn set_blanked(&mut self, blank: bool) -> Result<(), DisplayError>;

    /// Human-readable name for log output.
    fn name(&self) -> &'static str;
}

impl<T: DisplayController + ?Sized> DisplayController for Box<T> {
    fn apply_temperature(&mut self, kelvin: u32) -> Result<(), DisplayError> {
        (**self).apply_temperature(kelvin)
    }

    fn set_blanked(&mut self, blank: bool) -> Result<(), DisplayError> {
        (**self).set_blanked(blank)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Build the display controller for this run.
pub fn create_display(config: &Config, dry_run: bool) -> Box<dyn DisplayController> {
    if dry_run {
        Box::new(DryRunDisplay::new())
    } else {
        Box::new(CommandDisplay::from_config(config))
    }
}
