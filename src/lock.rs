//! Single-instance lock.
//!
//! Two daemons fighting over the same output would blank and restore the
//! screen on different schedules, so only one may run per user session.
//! The lock is an exclusive `flock` on a file in `$XDG_RUNTIME_DIR`. The file
//! is opened without truncation and only rewritten after the lock is held,
//! so a losing instance never clobbers the owner's PID.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::logger::Log;

/// Held for the lifetime of the daemon.
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

/// Default lock location for the current user.
pub fn default_lock_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(runtime_dir).join("screenburn.lock")
}

impl InstanceLock {
    /// Acquire the lock at `path`, failing if another instance holds it.
    pub fn acquire(path: &Path) -> Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("failed to open lock file {}", path.display()))?;

        if file.try_lock_exclusive().is_err() {
            let owner = std::fs::read_to_string(path).unwrap_or_default();
            let owner = owner.lines().next().unwrap_or("unknown").trim().to_string();
            anyhow::bail!(
                "Another instance of screenburn is already running (PID {}).",
                owner
            );
        }

        file.set_len(0).context("failed to truncate lock file")?;
        file.seek(SeekFrom::Start(0))
            .context("failed to rewind lock file")?;
        writeln!(file, "{}", std::process::id()).context("failed to write lock file")?;
        file.flush().context("failed to flush lock file")?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unlock and remove the lock file.
    pub fn release(self) {
        let _ = FileExt::unlock(&self.file);
        drop(self.file);

        if let Err(e) = std::fs::remove_file(&self.path) {
            Log::log_decorated(&format!("Warning: Failed to remove lock file: {}", e));
        } else {
            Log::log_verbose("Lock file removed successfully");
        }
    }
}
