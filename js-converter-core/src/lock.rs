use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::error::{ConvertError, LockHolder};

const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);
/// Attempts made by [`LockFile::acquire`] before giving up (about two seconds)
pub const DEFAULT_LOCK_ATTEMPTS: u32 = 40;

/// Advisory lock guarding a load-modify-store cycle on a shared file.
///
/// The lock lives next to the guarded file as `<file>.lock` and holds
/// `pid:timestamp`. Locks older than five minutes, or owned by a process that
/// no longer exists, are taken over.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    pid: u32,
    timestamp: u64,
    released: bool,
}

/// Path of the lock file guarding `target`
pub fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map_or_else(|| OsString::from("ledger"), ToOwned::to_owned);
    name.push(".lock");
    target.with_file_name(name)
}

impl LockFile {
    /// Acquire the lock for `target`, waiting briefly for a live holder to finish
    pub fn acquire(target: &Path) -> Result<Self> {
        Self::acquire_with_attempts(target, DEFAULT_LOCK_ATTEMPTS)
    }

    pub fn acquire_with_attempts(target: &Path, attempts: u32) -> Result<Self> {
        let lock_path = lock_path_for(target);
        let mut waited = 1;

        loop {
            match Self::try_create(&lock_path) {
                Ok(lock) => {
                    debug!(path = %lock_path.display(), "acquired lock");
                    return Ok(lock);
                },
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    let Some(holder) = Self::clear_if_abandoned(&lock_path)? else {
                        continue;
                    };
                    if waited >= attempts {
                        return Err(ConvertError::LedgerLocked {
                            path: lock_path,
                            holder,
                        }
                        .into());
                    }
                    waited += 1;
                    thread::sleep(LOCK_RETRY_DELAY);
                },
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create lock file: {}", lock_path.display())
                    });
                },
            }
        }
    }

    fn try_create(lock_path: &Path) -> std::io::Result<Self> {
        let pid = process::id();
        let timestamp = now_secs();

        // Fail if file exists (race condition protection)
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(lock_path)?;
        file.write_all(format!("{}:{}", pid, timestamp).as_bytes())?;

        Ok(Self {
            path: lock_path.to_path_buf(),
            pid,
            timestamp,
            released: false,
        })
    }

    /// Remove a stale, orphaned or malformed lock. Returns the holder when the
    /// lock is still live.
    fn clear_if_abandoned(lock_path: &Path) -> Result<Option<LockHolder>> {
        let content = match fs::read_to_string(lock_path) {
            Ok(content) => content,
            // Holder released it after our create attempt
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read lock file: {}", lock_path.display())
                });
            },
        };

        // Holder is still writing its PID
        if content.is_empty() && !is_older_than(lock_path, STALE_LOCK_TIMEOUT_SECS) {
            return Ok(Some(LockHolder(None)));
        }

        if let Some((pid, timestamp)) = parse_lock_content(&content) {
            let age = now_secs().saturating_sub(timestamp);
            if age <= STALE_LOCK_TIMEOUT_SECS && is_process_running(pid) {
                return Ok(Some(LockHolder(Some(pid))));
            }
        }

        warn!(path = %lock_path.display(), "removing abandoned lock file");
        match fs::remove_file(lock_path) {
            Ok(()) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove stale lock file: {}", lock_path.display())
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ours(&self) -> bool {
        fs::read_to_string(&self.path).is_ok_and(|content| {
            content.trim() == format!("{}:{}", self.pid, self.timestamp)
        })
    }

    /// Release the lock
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        if self.is_ours() {
            fs::remove_file(&self.path).context("Failed to remove lock file")?;
        }
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        // Best effort cleanup on drop
        if !self.released && self.is_ours() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn parse_lock_content(content: &str) -> Option<(u32, u64)> {
    let (pid, timestamp) = content.trim().split_once(':')?;
    Some((pid.parse().ok()?, timestamp.parse().ok()?))
}

fn is_older_than(path: &Path, secs: u64) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age.as_secs() > secs)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Check if a process with the given PID is running
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // 0 and negative values address process groups, not a single process
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }

    // On Unix, we can check if a process exists by sending signal 0
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    // Fallback: assume process is not running if we can't check
    false
}
