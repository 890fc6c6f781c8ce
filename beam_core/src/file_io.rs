//! # File I/O Module
//!
//! Session file operations:
//! - **Atomic saves**: write to `.beam.tmp`, sync, re-read and parse, then rename
//! - **File locking**: keep two editors from saving over each other
//! - **Load checks**: schema version and load validity are checked on open
//!
//! ## File Format
//!
//! Sessions are saved as `.beam` files containing pretty-printed JSON.
//! Lock files use the `.beam.lock` extension and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{save_session, load_session, FileLock};
//! use beam_core::session::Session;
//! use beam_core::calculations::BeamKind;
//! use std::path::Path;
//!
//! let session = Session::new("Lintel", 4.0, BeamKind::SimplySupported)?;
//! let path = Path::new("lintel.beam");
//!
//! let lock = FileLock::acquire(path, "drafter")?;
//! save_session(&session, path)?;
//! drop(lock);
//!
//! let reopened = load_session(path)?;
//! assert_eq!(reopened.meta.title, "Lintel");
//! # Ok::<(), beam_core::errors::EngineError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::session::{Session, SCHEMA_VERSION};

/// Extension of session files
pub const SESSION_EXTENSION: &str = "beam";

/// Lock file metadata stored in `.beam.lock` files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who holds the lock (user name or email)
    pub user_id: String,
    /// Machine the lock was taken on
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock is stale when its process is gone from this machine or it is
    /// more than a day old
    pub fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > 24
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a session file, released on drop.
///
/// Holds an OS-level lock (via `fs2`) on the lock file and writes
/// [`LockInfo`] into it so other users can see who is editing.
#[derive(Debug)]
pub struct FileLock {
    session_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - lock acquired (a stale lock is taken over)
    /// * `Err(EngineError::FileLocked)` - someone else holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> EngineResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(EngineError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            warn!(
                "taking over stale lock on {} held by {}",
                path.display(),
                existing.user_id
            );
        }

        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| io_error("create lock", &lock_path, e))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            EngineError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let json = serde_json::to_string_pretty(&info).map_err(EngineError::serialization)?;
        lock_file
            .write_all(json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| io_error("write lock", &lock_path, e))?;

        debug!("locked {} for {}", path.display(), info.user_id);
        Ok(FileLock {
            session_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Who holds a live lock on `path`, if anyone
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `x.beam` -> `x.beam.lock`
fn lock_path_for(session_path: &Path) -> PathBuf {
    with_suffix(session_path, "lock")
}

/// Append `suffix` to the file's existing extension
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => format!("{}.{}", ext.to_string_lossy(), suffix),
        None => suffix.to_string(),
    };
    path.with_extension(extension)
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn io_error(operation: &str, path: &Path, err: std::io::Error) -> EngineError {
    EngineError::file_error(operation, path.display().to_string(), err.to_string())
}

/// Save a session with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write and fsync `<path>.tmp`
/// 3. Read the temp file back and parse it
/// 4. Rename over `path`
///
/// The previous file is left untouched if any step fails.
pub fn save_session(session: &Session, path: &Path) -> EngineResult<()> {
    let json = serde_json::to_string_pretty(session).map_err(EngineError::serialization)?;
    let tmp_path = with_suffix(path, "tmp");

    let result = write_verified(&json, &tmp_path).and_then(|_| {
        fs::rename(&tmp_path, path).map_err(|e| io_error("rename to final", path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    } else {
        info!("saved session '{}' to {}", session.meta.title, path.display());
    }
    result
}

fn write_verified(json: &str, tmp_path: &Path) -> EngineResult<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| io_error("create temp file", tmp_path, e))?;
    tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| io_error("write temp file", tmp_path, e))?;

    let written = fs::read_to_string(tmp_path).map_err(|e| io_error("verify temp file", tmp_path, e))?;
    serde_json::from_str::<Session>(&written).map_err(|e| {
        EngineError::serialization(format!("Written file failed to parse back: {}", e))
    })?;
    Ok(())
}

/// Load a session from a file.
///
/// # Returns
///
/// * `Ok(Session)` - loaded, with a beam and loads that pass validation
/// * `Err(EngineError::VersionMismatch)` - written by an incompatible version
/// * `Err(EngineError::SerializationError)` - not a session file
/// * `Err(EngineError::InvalidBeamConfig | InvalidLoad)` - edited into an invalid state
/// * `Err(EngineError::FileError)` - I/O error
pub fn load_session(path: &Path) -> EngineResult<Session> {
    let contents = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;

    let session: Session = serde_json::from_str(&contents).map_err(|e| {
        EngineError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&session.meta.version)?;
    session.beam.validate()?;
    session.loads.validate(session.beam.length)?;

    debug!("loaded {} loads from {}", session.loads.len(), path.display());
    Ok(session)
}

/// Load a session along with the current lock holder, if any.
///
/// A locked file can still be opened read-only.
pub fn load_session_with_lock_check(path: &Path) -> EngineResult<(Session, Option<LockInfo>)> {
    let session = load_session(path)?;
    Ok((session, FileLock::check(path)))
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// The major version must match; while the major version is 0 a newer
/// minor version is also rejected.
fn validate_version(file_version: &str) -> EngineResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    let compatible = match (file.as_slice(), current.as_slice()) {
        ([file_major, file_rest @ ..], [major, rest @ ..]) if file_major == major => {
            *major != 0
                || match (file_rest.first(), rest.first()) {
                    (Some(file_minor), Some(minor)) => file_minor <= minor,
                    _ => true,
                }
        }
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(EngineError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}
