//! Reading back archives produced by [`build_archive`](super::build_archive).

use crate::error::Result;
use flate2::read::GzDecoder;
use std::io::Read;

/// A file recovered from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Slash-separated path relative to the archived directory.
    pub path: String,
    /// Unix permission bits.
    pub mode: u32,
    /// File content.
    pub data: Vec<u8>,
}

/// List the regular files stored in a gzipped tar archive.
///
/// An empty buffer is the empty archive.
pub fn read_archive(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut entries = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path()?.to_string_lossy().into_owned();
        let mode = entry.header().mode()?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;

        entries.push(ArchiveEntry { path, mode, data });
    }

    Ok(entries)
}
