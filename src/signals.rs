//! Termination signal handling.
//!
//! A background thread waits on SIGINT, SIGTERM and SIGHUP and cancels the
//! control loop's token. The loop then exits at its next check and runs the
//! normal shutdown path, which turns a blanked screen back on. Nothing is
//! restored from inside the signal thread itself, so display calls stay
//! serialized on the loop thread.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::thread;

use crate::logger::Log;
use crate::ticker::CancellationToken;

/// User-facing description of a shutdown signal.
pub fn describe_signal(signal: i32) -> &'static str {
    match signal {
        SIGINT => "Received interrupt signal, initiating graceful shutdown...",
        SIGTERM => "Received termination request, initiating graceful shutdown...",
        SIGHUP => "Received hangup signal, initiating graceful shutdown...",
        _ => "Received shutdown signal, initiating graceful shutdown...",
    }
}

/// Register shutdown signals and cancel `token` when one arrives.
pub fn setup_signal_handler(token: CancellationToken) -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                Log::log_pipe();
                Log::log_decorated(describe_signal(signal));
                token.cancel();
                // Keep the thread alive; repeated signals are harmless.
            }
        })
        .context("failed to spawn signal handler thread")?;

    Ok(())
}
