//! Advisory lock on the output directory.
//!
//! Two runs against the same output root would both see a video as pending
//! and fetch it twice. The lock file `<output_root>/.chanfetch.lock` holds the
//! owner's pid; it is hard-linked into place from a per-process staging
//! file, so it is never observed empty, and removed on drop. A lock whose
//! owner is no longer alive is taken over.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const LOCK_FILE_NAME: &str = ".chanfetch.lock";

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error(
        "output directory {} is in use by another chanfetch run (pid {pid}); remove {} if that run is gone",
        .dir.display(),
        .path.display()
    )]
    Held { dir: PathBuf, path: PathBuf, pid: u32 },
    #[error("lock file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Held for the duration of a download run.
#[derive(Debug)]
pub struct OutputLock {
    path: PathBuf,
}

impl OutputLock {
    pub fn acquire(output_root: &Path) -> Result<Self, LockError> {
        let path = output_root.join(LOCK_FILE_NAME);

        // The pid is written to a private file first and linked into place,
        // so the lock file never exists without its owner.
        let pid = std::process::id();
        let staged = output_root.join(format!("{LOCK_FILE_NAME}.{pid}"));
        fs::write(&staged, pid.to_string()).map_err(|source| LockError::Io {
            path: staged.clone(),
            source,
        })?;
        let result = Self::link_into_place(output_root, &staged, &path);
        if let Err(e) = fs::remove_file(&staged) {
            tracing::debug!(path = %staged.display(), "could not remove staged lock: {}", e);
        }
        result
    }

    fn link_into_place(output_root: &Path, staged: &Path, path: &Path) -> Result<Self, LockError> {
        let io_err = |source| LockError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Second attempt only happens after removing a stale lock.
        for _ in 0..2 {
            match fs::hard_link(staged, path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "acquired output lock");
                    return Ok(Self {
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => match read_owner(path) {
                    Some(pid) if process_alive(pid) => {
                        return Err(LockError::Held {
                            dir: output_root.to_path_buf(),
                            path: path.to_path_buf(),
                            pid,
                        });
                    }
                    owner => {
                        tracing::warn!(
                            path = %path.display(),
                            ?owner,
                            "removing stale output lock"
                        );
                        match fs::remove_file(path) {
                            Ok(()) => {}
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                            Err(e) => return Err(io_err(e)),
                        }
                    }
                },
                Err(e) => return Err(io_err(e)),
            }
        }

        Err(io_err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "lock file reappeared while taking over a stale lock",
        )))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for OutputLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::debug!(path = %self.path.display(), "could not remove output lock: {}", e);
        }
    }
}

fn read_owner(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }
    // SAFETY: signal 0 performs only the existence and permission check.
    let rc = unsafe { libc::kill(pid, 0) };
    rc == 0 || io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}
