//! One sshrc invocation, from local files to the finished ssh session.
//!
//! ```text
//! .sshrc ─────────────┐
//! .sshrc.d ─► tar.gz ─┼─► base64 ─► size guard ─► bootstrap ─► ssh -t -- <command>
//! sourcing fragment ──┘
//! ```

use crate::archive::build_archive;
use crate::bootstrap::{outer_bootstrap, sourcing_fragment};
use crate::config::SshrcConfig;
use crate::encoding::EncodedBundle;
use crate::error::{Error, Result};
use crate::guard::{check_size, SizeReport};
use crate::launcher::{build_transport_args, Transport};
use std::ffi::OsString;
use tracing::{debug, info};

/// Everything needed to start the remote session.
#[derive(Debug, Clone)]
pub struct PreparedSession {
    /// Encoded payloads.
    pub bundle: EncodedBundle,
    /// Measured sizes, already checked against the budget.
    pub sizes: SizeReport,
    /// Remote command handed to ssh.
    pub command: String,
}

/// Read the configuration, package it and compose the remote command.
///
/// Fails when `.sshrc` is missing, when any file cannot be read, or when the
/// encoded payloads exceed the configured budget. An absent `.sshrc.d` yields
/// an empty auxiliary payload.
pub fn prepare(config: &SshrcConfig) -> Result<PreparedSession> {
    config.validate()?;

    let primary_path = config.primary_path();
    if !primary_path.is_file() {
        return Err(Error::MissingConfig(primary_path));
    }
    let primary = std::fs::read(&primary_path)?;

    let aux_dir = config.aux_dir();
    let auxiliary = if aux_dir.is_dir() {
        build_archive(&aux_dir)?
    } else {
        debug!(dir = %aux_dir.display(), "no auxiliary directory");
        Vec::new()
    };

    let fragment = sourcing_fragment();
    let bundle = EncodedBundle::new(&primary, &auxiliary, fragment.as_bytes());
    for payload in bundle.payloads() {
        debug!(payload = %payload.kind, len = payload.len(), "encoded payload");
    }
    let sizes = check_size(&bundle, config.max_payload_size)?;
    let command = outer_bootstrap(&bundle);

    Ok(PreparedSession {
        bundle,
        sizes,
        command,
    })
}

/// Run a full session: validate `args`, prepare the command and hand it to
/// `transport`.
///
/// `args` are the command-line arguments after the program name, host
/// included. They are checked before the configuration is touched.
pub fn run(args: &[OsString], config: &SshrcConfig, transport: &dyn Transport) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Usage);
    }

    let prepared = prepare(config)?;
    let transport_args = build_transport_args(args, &prepared.command);
    info!(
        payload_len = prepared.bundle.total_len(),
        command_len = prepared.command.len(),
        "starting remote session"
    );

    let exit = transport.launch(&transport_args)?;
    if exit.success() {
        Ok(())
    } else {
        Err(Error::TransportFailed { code: exit.code })
    }
}
