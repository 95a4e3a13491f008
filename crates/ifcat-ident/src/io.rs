//! Shared file access helpers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IdentError, Result};

/// Open a file, mapping a missing path to [`IdentError::FileNotFound`].
pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IdentError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IdentError::Io(e)
        }
    })
}

/// Fill `buf` completely, reporting how many bytes were available when the
/// file is shorter than the requested prefix.
pub(crate) fn read_full(file: &mut File, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(IdentError::TooShort {
                needed: buf.len(),
                got: filled,
            });
        }
        filled += n;
    }
    Ok(())
}

/// Read at most `limit` bytes from the start of the file at `path`.
pub(crate) fn read_prefix(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = open(path)?;
    let mut buf = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}
