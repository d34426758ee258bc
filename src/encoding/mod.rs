//! Transport-safe text encoding of payloads.
//!
//! Every payload crosses to the remote host as standard base64 inside a
//! single-quoted shell word, which `base64 --decode` turns back into bytes.

mod bundle;
mod payload;
mod transport;

pub use bundle::EncodedBundle;
pub use payload::{Payload, PayloadKind};
pub use transport::{decode, encode};
