use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// The process was started and ran to completion. `exit_code` is `None` when it was
    /// terminated by a signal.
    Completed { exit_code: Option<i32> },
    /// The process could not be started.
    LaunchFailed { reason: String, os_code: Option<i32> },
    /// The process outlived the configured timeout and was killed.
    TimedOut { after: Duration },
    /// The process was started but waiting for it failed.
    WaitFailed { reason: String },
}

impl ProcessResult {
    pub fn launch_failed(err: &io::Error) -> Self {
        Self::LaunchFailed {
            reason: err.to_string(),
            os_code: err.raw_os_error(),
        }
    }

    /// Whether the process was started and waited for, regardless of its exit code.
    pub fn ran(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Completed { exit_code } => *exit_code,
            _ => None,
        }
    }
}

impl fmt::Display for ProcessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { exit_code: Some(code) } => write!(f, "exited with code {code}"),
            Self::Completed { exit_code: None } => f.write_str("terminated by signal"),
            Self::LaunchFailed {
                reason,
                os_code: Some(code),
            } => write!(f, "failed to start process, error {code}: {reason}"),
            Self::LaunchFailed { reason, os_code: None } => {
                write!(f, "failed to start process: {reason}")
            }
            Self::TimedOut { after } => write!(f, "killed after {} ms", after.as_millis()),
            Self::WaitFailed { reason } => write!(f, "failed to wait for process: {reason}"),
        }
    }
}

/// Starts an external program and blocks until it is done.
pub trait ProcessLauncher {
    fn launch(&self, executable: &Path, args: &[OsString]) -> ProcessResult;
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for &T {
    fn launch(&self, executable: &Path, args: &[OsString]) -> ProcessResult {
        (**self).launch(executable, args)
    }
}

/// Launches through [`std::process::Command`] with inherited stdio.
#[derive(Debug, Default, Clone)]
pub struct SystemLauncher {
    timeout: Option<Duration>,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills the child if it has not exited within `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout) }
    }

    fn wait_bounded(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if start.elapsed() >= timeout {
                // The child may have exited since `try_wait`.
                let _ = child.kill();
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, executable: &Path, args: &[OsString]) -> ProcessResult {
        let mut child = match Command::new(executable).args(args).spawn() {
            Ok(child) => child,
            Err(err) => return ProcessResult::launch_failed(&err),
        };

        let status = match self.timeout {
            None => child.wait().map(Some),
            Some(timeout) => Self::wait_bounded(&mut child, timeout),
        };

        match status {
            Ok(Some(status)) => ProcessResult::Completed {
                exit_code: status.code(),
            },
            Ok(None) => ProcessResult::TimedOut {
                after: self.timeout.unwrap_or_default(),
            },
            Err(err) => ProcessResult::WaitFailed {
                reason: err.to_string(),
            },
        }
    }
}
