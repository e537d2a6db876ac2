//! One-shot command handlers.
//!
//! Each handler loads the configuration the same way the daemon does, performs
//! a single action and returns. None of them take the instance lock, so they
//! can be used alongside a running daemon.

pub mod status;
