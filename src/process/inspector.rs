// ────────────────────────────────
// src/process/inspector.rs
// Niceness lookups against the OS process table.
// ────────────────────────────────
use serde::Serialize;

/// Scheduling priority snapshot for a single process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessNiceness {
    #[serde(rename = "PID")]
    pub pid: i32,
    #[serde(rename = "Nice")]
    pub niceness: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// No process could be addressed by the identifier.
    #[error("{reason}")]
    ProcessNotFound { pid: i32, reason: String },

    /// The process was found but its priority could not be read.
    #[error("{reason}")]
    QueryFailed { pid: i32, reason: String },
}

impl InspectError {
    pub fn pid(&self) -> i32 {
        match self {
            InspectError::ProcessNotFound { pid, .. } | InspectError::QueryFailed { pid, .. } => {
                *pid
            }
        }
    }
}

/// Narrow `niceness-by-pid` capability so handlers can run against a fake.
pub trait ProcessInspector: Send + Sync {
    fn niceness(&self, pid: i32) -> Result<ProcessNiceness, InspectError>;
}

/// The identifier of the running server process.
pub fn current_pid() -> i32 {
    std::process::id() as i32
}

/// Queries the live process table. Nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInspector;

#[cfg(unix)]
impl ProcessInspector for SystemInspector {
    fn niceness(&self, pid: i32) -> Result<ProcessNiceness, InspectError> {
        use nix::errno::Errno;
        use nix::libc;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        // kill(0|-n, 0) addresses process groups, not a single process.
        if pid <= 0 {
            return Err(InspectError::ProcessNotFound {
                pid,
                reason: format!("invalid pid {}: {}", pid, Errno::ESRCH.desc()),
            });
        }

        match kill(Pid::from_raw(pid), None) {
            // EPERM still proves the process exists.
            Ok(()) | Err(Errno::EPERM) => {}
            Err(errno) => {
                return Err(InspectError::ProcessNotFound {
                    pid,
                    reason: errno.desc().to_string(),
                })
            }
        }

        // -1 is a valid niceness, so errno is the only failure signal.
        Errno::clear();
        let niceness = unsafe { libc::getpriority(libc::PRIO_PROCESS, pid as libc::id_t) };
        if niceness == -1 {
            let errno = Errno::last();
            if errno != Errno::UnknownErrno {
                return Err(InspectError::QueryFailed {
                    pid,
                    reason: errno.desc().to_string(),
                });
            }
        }

        tracing::trace!(pid, niceness, "read process priority");
        Ok(ProcessNiceness { pid, niceness })
    }
}

#[cfg(not(unix))]
impl ProcessInspector for SystemInspector {
    fn niceness(&self, pid: i32) -> Result<ProcessNiceness, InspectError> {
        Err(InspectError::QueryFailed {
            pid,
            reason: "unsupported platform".to_string(),
        })
    }
}
