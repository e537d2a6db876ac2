//! Fixed-interval scheduling for the control loop.
//!
//! [`run`] owns "how time passes": it measures the monotonic time between
//! ticks, hands it to the tick function, and sleeps until the next tick.
//! The sleep is split into short chunks so a cancellation request is noticed
//! within [`CHECK_INTERVAL_SECS`] rather than after a full interval.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::CHECK_INTERVAL_SECS;

/// Shared stop flag, set from the signal thread and read by the loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Call `tick_fn` every `interval` until `token` is cancelled.
///
/// `tick_fn` receives the monotonic time elapsed since the previous tick
/// (zero on the first call). Returns the number of ticks run.
pub fn run<F>(interval: Duration, token: &CancellationToken, mut tick_fn: F) -> u64
where
    F: FnMut(Duration),
{
    let check_interval = Duration::from_secs(CHECK_INTERVAL_SECS).min(interval);
    let mut last_tick: Option<Instant> = None;
    let mut ticks = 0;

    while !token.is_cancelled() {
        let now = Instant::now();
        let delta = last_tick.map_or(Duration::ZERO, |last| now.duration_since(last));
        last_tick = Some(now);

        tick_fn(delta);
        ticks += 1;

        // Sleep in smaller intervals to check the cancellation flag
        let mut slept = Duration::ZERO;
        while slept < interval && !token.is_cancelled() {
            let chunk = check_interval.min(interval - slept);
            thread::sleep(chunk);
            slept += chunk;
        }
    }

    ticks
}
