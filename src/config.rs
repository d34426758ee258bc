//! Configuration constants and types for sshrc.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Upper bound on the combined encoded payload size (64 KiB).
///
/// The whole bootstrap travels as one remote command argument, so it has to
/// stay well below typical command-line limits.
pub const MAX_PAYLOAD_SIZE: usize = 65536;

/// Environment variable overriding the configuration home.
pub const CONFIG_HOME_ENV: &str = "SSHHOME";

/// Fallback when `SSHHOME` is unset.
pub const HOME_ENV: &str = "HOME";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SSHRC_LOG";

/// Primary configuration file, relative to the configuration home.
pub const PRIMARY_FILE_NAME: &str = ".sshrc";

/// Optional auxiliary directory, relative to the configuration home.
pub const AUX_DIR_NAME: &str = ".sshrc.d";

/// Transport binary used unless configured otherwise.
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";

/// Settings for one sshrc invocation.
#[derive(Debug, Clone)]
pub struct SshrcConfig {
    /// Directory holding `.sshrc` and `.sshrc.d`.
    pub config_home: PathBuf,

    /// Transport binary to execute.
    pub ssh_program: OsString,

    /// Budget for the combined encoded payloads, in characters.
    pub max_payload_size: usize,
}

impl SshrcConfig {
    /// Create a configuration rooted at `config_home` with default settings.
    pub fn new(config_home: impl Into<PathBuf>) -> Self {
        Self {
            config_home: config_home.into(),
            ssh_program: OsString::from(DEFAULT_SSH_PROGRAM),
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }

    /// Resolve the configuration home from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Resolve the configuration home through `lookup`.
    ///
    /// `SSHHOME` wins when set and non-empty, then `HOME`, then the current
    /// directory.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let config_home = non_empty(CONFIG_HOME_ENV)
            .or_else(|| non_empty(HOME_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(config_home)
    }

    /// Use a different transport binary.
    pub fn with_ssh_program(mut self, program: impl Into<OsString>) -> Self {
        self.ssh_program = program.into();
        self
    }

    /// Use a different payload budget.
    pub fn with_max_payload_size(mut self, limit: usize) -> Self {
        self.max_payload_size = limit;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_payload_size == 0 {
            return Err(Error::InvalidConfig(
                "Payload budget must be greater than 0".to_string(),
            ));
        }
        if self.ssh_program.is_empty() {
            return Err(Error::InvalidConfig(
                "SSH program must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the primary configuration file.
    pub fn primary_path(&self) -> PathBuf {
        self.config_home.join(PRIMARY_FILE_NAME)
    }

    /// Path of the auxiliary directory.
    pub fn aux_dir(&self) -> PathBuf {
        self.config_home.join(AUX_DIR_NAME)
    }

    /// The configuration home.
    pub fn config_home(&self) -> &Path {
        &self.config_home
    }
}
