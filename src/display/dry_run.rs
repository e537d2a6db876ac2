//! Display controller that only reports what it would do.

use crate::display::DisplayController;
use crate::error::DisplayError;
use crate::logger::Log;

/// Records requests instead of running any tools.
#[derive(Debug, Default)]
pub struct DryRunDisplay {
    temperature: Option<u32>,
    blanked: bool,
}

impl DryRunDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last temperature requested, if any.
    pub fn temperature(&self) -> Option<u32> {
        self.temperature
    }

    pub fn is_blanked(&self) -> bool {
        self.blanked
    }
}

impl DisplayController for DryRunDisplay {
    fn apply_temperature(&mut self, kelvin: u32) -> Result<(), DisplayError> {
        Log::log_decorated(&format!("[dry run] Would set color temperature to {}K", kelvin));
        self.temperature = Some(kelvin);
        Ok(())
    }

    fn set_blanked(&mut self, blank: bool) -> Result<(), DisplayError> {
        if blank {
            Log::log_decorated("[dry run] Would turn the display off");
        } else {
            Log::log_decorated("[dry run] Would turn the display back on");
        }
        self.blanked = blank;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}
