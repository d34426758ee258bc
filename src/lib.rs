//! sshrc
//!
//! Carries a personal `.sshrc` (and an optional `.sshrc.d` directory) to any
//! host for the length of one interactive SSH session, without installing
//! anything there.
//!
//! # Features
//!
//! - **Self-contained bootstrap**: the remote side needs only a POSIX shell,
//!   `base64`, `tar` and `bash`
//! - **Ephemeral sandbox**: configuration lives in a temporary directory that
//!   an exit trap removes
//! - **Size guard**: payloads are checked against a 64 KiB budget before ssh
//!   is started
//!
//! # Architecture
//!
//! ```text
//! Files → Archive (tar.gz) → Encode (base64) → Guard (64 KiB) → Bootstrap → ssh -t
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sshrc::launcher::SshTransport;
//! use sshrc::SshrcConfig;
//! use std::ffi::OsString;
//!
//! let config = SshrcConfig::from_env();
//! let transport = SshTransport::new(config.ssh_program.clone());
//! let args = vec![OsString::from("alice@example.com")];
//!
//! sshrc::session::run(&args, &config, &transport).unwrap();
//! ```

pub mod archive;
pub mod bootstrap;
pub mod config;
pub mod encoding;
pub mod error;
pub mod guard;
pub mod launcher;
pub mod session;

pub use config::SshrcConfig;
pub use error::{Error, Result};
pub use session::{prepare, run, PreparedSession};
