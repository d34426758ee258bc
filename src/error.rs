//! Error types for sshrc.

use crate::guard::SizeReport;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sshrc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while packaging the configuration or launching ssh.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No host was given on the command line.
    #[error("Usage: sshrc <host> [ssh options]")]
    Usage,

    /// The primary configuration file does not exist.
    #[error("Failed to open .sshrc: {} does not exist", .0.display())]
    MissingConfig(PathBuf),

    /// Walking or reading the auxiliary directory failed.
    #[error("Failed to archive {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    /// A payload could not be decoded from its transport form.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The encoded payloads do not fit in the remote command.
    #[error("{0}")]
    PayloadTooLarge(SizeReport),

    /// The transport binary could not be started.
    #[error("SSH execution error: failed to launch {}: {source}", .program.to_string_lossy())]
    TransportLaunch {
        program: OsString,
        #[source]
        source: std::io::Error,
    },

    /// The transport exited unsuccessfully.
    #[error("SSH execution error: {}", describe_status(.code))]
    TransportFailed { code: Option<i32> },
}

impl Error {
    /// Process exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::Decoding(e.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(PathBuf::from).unwrap_or_default();
        Error::Archive {
            path,
            message: e.to_string(),
        }
    }
}

fn describe_status(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
