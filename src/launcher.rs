//! Launching the ssh client with the composed remote command.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Flag forcing pseudo-terminal allocation.
pub const FORCE_TTY_FLAG: &str = "-t";

/// Marker ending option parsing before the remote command.
pub const END_OF_OPTIONS: &str = "--";

/// How the transport process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportExit {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl TransportExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can run the transport with a full argument list.
///
/// Implementations block until the session ends.
pub trait Transport {
    fn launch(&self, args: &[OsString]) -> Result<TransportExit>;
}

/// Runs the ssh binary attached to the local terminal.
#[derive(Debug, Clone)]
pub struct SshTransport {
    program: OsString,
}

impl SshTransport {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Transport for SshTransport {
    fn launch(&self, args: &[OsString]) -> Result<TransportExit> {
        info!(
            program = %self.program.to_string_lossy(),
            args = args.len(),
            "launching transport"
        );

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::TransportLaunch {
                program: self.program.clone(),
                source,
            })?;

        // Interrupts typed locally belong to the session, not to us
        let _guard = signals::InterruptGuard::install();
        let status = child.wait()?;

        let exit = TransportExit {
            code: status.code(),
        };
        if !exit.success() {
            warn!(code = ?exit.code, "transport exited unsuccessfully");
        }
        Ok(exit)
    }
}

/// Append the forced tty flag, the end-of-options marker and `command` to
/// the user's arguments.
pub fn build_transport_args(user_args: &[OsString], command: &str) -> Vec<OsString> {
    let mut args = Vec::with_capacity(user_args.len() + 3);
    args.extend(user_args.iter().cloned());
    args.push(OsString::from(FORCE_TTY_FLAG));
    args.push(OsString::from(END_OF_OPTIONS));
    args.push(OsString::from(command));
    args
}

#[cfg(unix)]
mod signals {
    /// Keeps SIGINT and SIGQUIT from terminating this process while the
    /// child runs. A caught signal reverts to its default action across
    /// `exec`, so the child still receives them normally.
    pub struct InterruptGuard {
        previous: Vec<(libc::c_int, libc::sighandler_t)>,
    }

    extern "C" fn swallow(_signal: libc::c_int) {}

    impl InterruptGuard {
        pub fn install() -> Self {
            let handler = swallow as extern "C" fn(libc::c_int) as libc::sighandler_t;
            let previous = [libc::SIGINT, libc::SIGQUIT]
                .into_iter()
                .map(|signal| {
                    // SAFETY: `swallow` is async-signal-safe; it does nothing.
                    let old = unsafe { libc::signal(signal, handler) };
                    (signal, old)
                })
                .collect();
            Self { previous }
        }
    }

    impl Drop for InterruptGuard {
        fn drop(&mut self) {
            for &(signal, old) in &self.previous {
                if old != libc::SIG_ERR {
                    // SAFETY: restores the disposition returned by `signal`.
                    unsafe {
                        libc::signal(signal, old);
                    }
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod signals {
    pub struct InterruptGuard;

    impl InterruptGuard {
        pub fn install() -> Self {
            InterruptGuard
        }
    }
}
