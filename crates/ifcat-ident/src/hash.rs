//! Streaming content digests.

use std::io::Read;

use sha2::{Digest, Sha256};

use crate::error::Result;

const CHUNK_LEN: usize = 16 * 1024;

/// SHA-256 over everything remaining in `reader`, rendered as lowercase hex.
///
/// Reads in fixed-size chunks so arbitrarily large story files never need to
/// be resident in memory.
pub(crate) fn sha256_hex_to_end<R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; CHUNK_LEN];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
