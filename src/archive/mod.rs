//! Packaging of the auxiliary configuration directory.
//!
//! The directory tree is serialized as a tar stream and compressed with gzip,
//! which the remote side unpacks with a stock `tar xzf`.

mod builder;
mod reader;

pub use builder::build_archive;
pub use reader::{read_archive, ArchiveEntry};
