//! Break scheduling for the 20-20-20 rule.
//!
//! A two-phase state machine driven purely by the durations it is fed. It
//! never reads a clock, so feeding it the same sequence of deltas always
//! produces the same sequence of actions, and tests can run hours of screen
//! time without sleeping.
//!
//! ```text
//!        elapsed >= active_duration / Blank
//!   ┌────────┐ ─────────────────────────▶ ┌───────┐
//!   │ Active │                            │ Break │
//!   └────────┘ ◀───────────────────────── └───────┘
//!        elapsed >= break_duration / Restore
//! ```

use std::time::Duration;

use crate::constants::{DEFAULT_BREAK_DURATION, DEFAULT_BREAK_INTERVAL};
use crate::error::CalculationError;

/// How long to work between breaks and how long each break lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakConfig {
    active_duration: Duration,
    break_duration: Duration,
}

impl BreakConfig {
    pub fn new(active_duration: Duration, break_duration: Duration) -> Result<Self, CalculationError> {
        if active_duration.is_zero() {
            return Err(CalculationError::ZeroDuration("active duration"));
        }
        if break_duration.is_zero() {
            return Err(CalculationError::ZeroDuration("break duration"));
        }
        Ok(Self {
            active_duration,
            break_duration,
        })
    }

    pub fn active_duration(&self) -> Duration {
        self.active_duration
    }

    pub fn break_duration(&self) -> Duration {
        self.break_duration
    }
}

impl Default for BreakConfig {
    /// Twenty minutes on, twenty seconds off.
    fn default() -> Self {
        Self {
            active_duration: Duration::from_secs(DEFAULT_BREAK_INTERVAL),
            break_duration: Duration::from_secs(DEFAULT_BREAK_DURATION),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakPhase {
    Active,
    Break,
}

/// Side effect requested by a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakAction {
    Blank,
    Restore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakScheduler {
    config: BreakConfig,
    phase: BreakPhase,
    elapsed: Duration,
}

impl BreakScheduler {
    /// Start in the active phase with nothing elapsed.
    pub fn new(config: BreakConfig) -> Self {
        Self {
            config,
            phase: BreakPhase::Active,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `delta`, returning an action only on the tick that crosses
    /// a phase boundary.
    ///
    /// The elapsed counter is reset to zero on every transition; any overshoot
    /// from a long delta is dropped rather than carried into the next phase.
    pub fn tick(&mut self, delta: Duration) -> Option<BreakAction> {
        self.elapsed = self.elapsed.saturating_add(delta);

        match self.phase {
            BreakPhase::Active if self.elapsed >= self.config.active_duration => {
                self.phase = BreakPhase::Break;
                self.elapsed = Duration::ZERO;
                Some(BreakAction::Blank)
            }
            BreakPhase::Break if self.elapsed >= self.config.break_duration => {
                self.phase = BreakPhase::Active;
                self.elapsed = Duration::ZERO;
                Some(BreakAction::Restore)
            }
            _ => None,
        }
    }

    pub fn phase(&self) -> BreakPhase {
        self.phase
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_on_break(&self) -> bool {
        self.phase == BreakPhase::Break
    }

    pub fn config(&self) -> &BreakConfig {
        &self.config
    }

    /// Time left in the current phase.
    pub fn remaining(&self) -> Duration {
        let target = match self.phase {
            BreakPhase::Active => self.config.active_duration,
            BreakPhase::Break => self.config.break_duration,
        };
        target.saturating_sub(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn twenty_twenty() -> BreakScheduler {
        BreakScheduler::new(
            BreakConfig::new(
                Duration::from_secs(TEST_BREAK_INTERVAL),
                Duration::from_secs(TEST_BREAK_DURATION),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_config_rejects_zero_durations() {
        assert_eq!(
            BreakConfig::new(Duration::ZERO, SECOND),
            Err(CalculationError::ZeroDuration("active duration"))
        );
        assert_eq!(
            BreakConfig::new(SECOND, Duration::ZERO),
            Err(CalculationError::ZeroDuration("break duration"))
        );
    }

    #[test]
    fn test_default_is_twenty_minutes_twenty_seconds() {
        let config = BreakConfig::default();
        assert_eq!(config.active_duration(), Duration::from_secs(1200));
        assert_eq!(config.break_duration(), Duration::from_secs(20));
    }

    #[test]
    fn test_starts_active_with_nothing_elapsed() {
        let scheduler = twenty_twenty();
        assert_eq!(scheduler.phase(), BreakPhase::Active);
        assert_eq!(scheduler.elapsed(), Duration::ZERO);
        assert_eq!(scheduler.remaining(), Duration::from_secs(1200));
    }

    #[test]
    fn test_one_second_ticks_through_a_full_cycle() {
        let mut scheduler = twenty_twenty();

        for tick in 1..1200 {
            assert_eq!(scheduler.tick(SECOND), None, "active tick {}", tick);
        }
        assert_eq!(scheduler.tick(SECOND), Some(BreakAction::Blank));
        assert!(scheduler.is_on_break());
        assert_eq!(scheduler.elapsed(), Duration::ZERO);

        for tick in 1..20 {
            assert_eq!(scheduler.tick(SECOND), None, "break tick {}", tick);
        }
        assert_eq!(scheduler.tick(SECOND), Some(BreakAction::Restore));
        assert_eq!(scheduler.phase(), BreakPhase::Active);
        assert_eq!(scheduler.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_actions_are_not_repeated_while_in_phase() {
        let mut scheduler = twenty_twenty();
        let actions: Vec<_> = (0..1210).filter_map(|_| scheduler.tick(SECOND)).collect();
        assert_eq!(actions, vec![BreakAction::Blank]);
    }

    #[test]
    fn test_overshoot_is_not_carried_over() {
        let mut scheduler = twenty_twenty();
        assert_eq!(
            scheduler.tick(Duration::from_secs(5000)),
            Some(BreakAction::Blank)
        );
        assert_eq!(scheduler.elapsed(), Duration::ZERO);
        // A single huge delta causes one transition only.
        assert!(scheduler.is_on_break());
    }

    #[test]
    fn test_zero_delta_never_transitions() {
        let mut scheduler = twenty_twenty();
        for _ in 0..10_000 {
            assert_eq!(scheduler.tick(Duration::ZERO), None);
        }
        assert_eq!(scheduler.phase(), BreakPhase::Active);
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut scheduler = twenty_twenty();
        scheduler.tick(Duration::from_secs(200));
        assert_eq!(scheduler.remaining(), Duration::from_secs(1000));
    }

    #[test]
    fn test_identical_inputs_give_identical_actions() {
        let deltas: Vec<Duration> = (0..5000)
            .map(|i| Duration::from_millis(250 + (i % 7) * 300))
            .collect();

        let run = || {
            let mut scheduler = twenty_twenty();
            deltas
                .iter()
                .map(|d| scheduler.tick(*d))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
