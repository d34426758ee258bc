//! Gzipped tar builder for the auxiliary directory.

use crate::error::{Error, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Archive every regular file below `root`.
///
/// Entry names are relative to `root`. Directories produce no entries of
/// their own; the remote `tar` creates parents as it writes files. Any walk
/// or read failure aborts the whole build, so a partial archive is never
/// returned.
///
/// # Example
///
/// ```rust,no_run
/// use sshrc::archive::{build_archive, read_archive};
/// use std::path::Path;
///
/// let bytes = build_archive(Path::new("/home/alice/.sshrc.d")).unwrap();
/// for entry in read_archive(&bytes).unwrap() {
///     println!("{} ({} bytes)", entry.path, entry.data.len());
/// }
/// ```
pub fn build_archive(root: &Path) -> Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;

        // Only regular files are shipped
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = path.strip_prefix(root).map_err(|e| Error::Archive {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        builder
            .append_path_with_name(path, name)
            .map_err(|e| Error::Archive {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(file = %name.display(), "archived");
    }

    let encoder = builder.into_inner()?;
    Ok(encoder.finish()?)
}
