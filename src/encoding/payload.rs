//! Named payloads destined for the remote command.

use super::transport::encode;
use std::fmt;

/// Which part of the bootstrap a payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// The primary `.sshrc` file.
    Primary,
    /// The gzipped tar of `.sshrc.d`.
    Auxiliary,
    /// The generated sourcing fragment.
    Bootstrap,
}

impl PayloadKind {
    /// Label used when reporting sizes.
    pub fn label(&self) -> &'static str {
        match self {
            PayloadKind::Primary => ".sshrc",
            PayloadKind::Auxiliary => ".sshrc.d/",
            PayloadKind::Bootstrap => "bootstrap",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub kind: PayloadKind,
    /// Base64 text, empty for an empty payload.
    pub text: String,
}

impl Payload {
    /// Encode `data` as a payload of the given kind.
    pub fn encode(kind: PayloadKind, data: &[u8]) -> Self {
        Self {
            kind,
            text: encode(data),
        }
    }

    /// An empty payload, used when the auxiliary directory is absent.
    pub fn empty(kind: PayloadKind) -> Self {
        Self {
            kind,
            text: String::new(),
        }
    }

    /// Encoded length in characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
