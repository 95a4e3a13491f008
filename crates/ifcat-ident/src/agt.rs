//! AGT (`.agx`) story files.

use std::io::{Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::{IdentError, Result};
use crate::id::StoryId;
use crate::io::{open, read_full};

/// Magic bytes at the start of every AGX file.
pub const AGX_MAGIC: [u8; 4] = [0x58, 0xC7, 0xC1, 0x51];

/// Fixed-size file prefix the AGT probe operates on.
pub const HEADER_LEN: usize = 36;

// Offset of the pointer to the game description block.
const DESC_PTR_OFFSET: usize = 32;

/* Helpers to unencode little-endian integers from AGT files */

fn read_agt_short(bytes: [u8; 2]) -> i16 {
    i16::from_le_bytes(bytes)
}

fn read_agt_int(bytes: [u8; 4]) -> i32 {
    i32::from_le_bytes(bytes)
}

/// True when the header carries the AGX magic. Requires 36 bytes.
pub fn is_agt(header: &[u8]) -> bool {
    header.len() >= HEADER_LEN && header[..4] == AGX_MAGIC
}

/// Compute the `AGT-<version>-<signature>` identifier for the story file at
/// `path`.
///
/// The pointer at byte 32 locates the game description block, which opens
/// with a 16-bit version and a 32-bit signature, both little-endian and
/// signed.
pub fn story_id(path: &Path) -> Result<StoryId> {
    let mut file = open(path)?;
    let mut header = [0u8; HEADER_LEN];
    read_full(&mut file, &mut header)?;
    if !is_agt(&header) {
        return Err(IdentError::UnrecognizedFormat { format: "AGT" });
    }
    let block = read_agt_int([
        header[DESC_PTR_OFFSET],
        header[DESC_PTR_OFFSET + 1],
        header[DESC_PTR_OFFSET + 2],
        header[DESC_PTR_OFFSET + 3],
    ]);

    let len = file.metadata()?.len();
    if block < 0 || len < block as u64 + 6 {
        return Err(IdentError::BlockOutOfBounds {
            offset: i64::from(block),
            len,
        });
    }

    file.seek(SeekFrom::Start(block as u64))?;
    let mut desc = [0u8; 6];
    read_full(&mut file, &mut desc)?;
    let version = read_agt_short([desc[0], desc[1]]);
    let signature = read_agt_int([desc[2], desc[3], desc[4], desc[5]]);
    debug!(version, "agt story identified");
    Ok(StoryId::new(format!("AGT-{version:05}-{signature:08X}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_detection() {
        let mut header = [0u8; HEADER_LEN];
        header[..4].copy_from_slice(&AGX_MAGIC);
        assert!(is_agt(&header));

        header[0] = 0x59;
        assert!(!is_agt(&header));
    }

    #[test]
    fn magic_requires_full_header() {
        assert!(!is_agt(&AGX_MAGIC));
    }

    #[test]
    fn little_endian_field_decoding() {
        assert_eq!(read_agt_short([0x01, 0x00]), 1);
        assert_eq!(read_agt_short([0xFF, 0xFF]), -1);
        assert_eq!(read_agt_int([0x1D, 0x0C, 0x7F, 0x2A]), 0x2A7F_0C1D);
        assert_eq!(read_agt_int([0xFF, 0xFF, 0xFF, 0xFF]), -1);
    }
}
