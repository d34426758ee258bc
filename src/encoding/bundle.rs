//! The set of payloads embedded in one remote command.

use super::payload::{Payload, PayloadKind};

/// Encoded primary file, auxiliary archive and sourcing fragment.
#[derive(Debug, Clone)]
pub struct EncodedBundle {
    pub primary: Payload,
    pub auxiliary: Payload,
    pub bootstrap: Payload,
}

impl EncodedBundle {
    /// Encode raw payload bytes. An empty `auxiliary` yields an empty payload.
    pub fn new(primary: &[u8], auxiliary: &[u8], bootstrap: &[u8]) -> Self {
        let auxiliary = if auxiliary.is_empty() {
            Payload::empty(PayloadKind::Auxiliary)
        } else {
            Payload::encode(PayloadKind::Auxiliary, auxiliary)
        };

        Self {
            primary: Payload::encode(PayloadKind::Primary, primary),
            auxiliary,
            bootstrap: Payload::encode(PayloadKind::Bootstrap, bootstrap),
        }
    }

    /// Payloads in embedding order.
    pub fn payloads(&self) -> [&Payload; 3] {
        [&self.primary, &self.auxiliary, &self.bootstrap]
    }

    /// Combined encoded length in characters.
    pub fn total_len(&self) -> usize {
        self.payloads().iter().map(|p| p.len()).sum()
    }
}
