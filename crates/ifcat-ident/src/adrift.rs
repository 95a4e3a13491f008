//! ADRIFT (`.taf`) story files.
//!
//! ADRIFT ships its header obfuscated by the Visual Basic RNG stream cipher.
//! The claim check unobfuscates the first seven bytes and looks for the word
//! "Version"; it seems fairly unlikely that the obfuscated form of that word
//! would occur in the wild.

use std::path::Path;

use tracing::debug;

use crate::error::{IdentError, Result};
use crate::hash::sha256_hex_to_end;
use crate::id::StoryId;
use crate::io::{open, read_full};
use crate::vbrng::VbRng;

/// Fixed-size file prefix the ADRIFT probes operate on.
pub const HEADER_LEN: usize = 12;

// ADRIFT 5 files are identifiable but not playable by the bundled
// interpreter.
const MAX_PLAYABLE_VERSION: u32 = 500;

const SIGNATURE: &[u8; 7] = b"Version";

/// True when the first seven bytes, translated from a fresh generator,
/// spell out `Version`. Requires the full 12-byte header.
pub fn is_adrift(header: &[u8]) -> bool {
    if header.len() < HEADER_LEN {
        return false;
    }
    let mut rng = VbRng::new();
    header[..SIGNATURE.len()]
        .iter()
        .map(|&byte| rng.translate(byte))
        .eq(SIGNATURE.iter().copied())
}

/// Decode the version number stored at bytes 8-11 of the header, in the
/// on-disk format `N.NN` with the dot at byte 9.
///
/// `rng` must have consumed exactly the first eight byte positions; byte 9
/// is discarded but still advances the generator.
pub fn version_code(header: &[u8], rng: &mut VbRng) -> Result<u32> {
    if header.len() < HEADER_LEN {
        return Err(IdentError::TooShort {
            needed: HEADER_LEN,
            got: header.len(),
        });
    }
    let mut digits = [0u8; 3];
    digits[0] = rng.translate(header[8]);
    rng.burn(1);
    digits[1] = rng.translate(header[10]);
    digits[2] = rng.translate(header[11]);
    let text = std::str::from_utf8(&digits).map_err(|_| IdentError::BadVersionDigits)?;
    text.parse().map_err(|_| IdentError::BadVersionDigits)
}

/// Playability probe: the signature must match and the version must predate
/// ADRIFT 5.
pub fn is_playable(header: &[u8]) -> bool {
    if header.len() < HEADER_LEN {
        return false;
    }
    let mut rng = VbRng::new();
    let claimed = header[..SIGNATURE.len()]
        .iter()
        .map(|&byte| rng.translate(byte))
        .eq(SIGNATURE.iter().copied());
    if !claimed {
        return false;
    }
    rng.burn(1);
    match version_code(header, &mut rng) {
        Ok(version) => version < MAX_PLAYABLE_VERSION,
        Err(_) => false,
    }
}

/// Compute the `ADRIFT-<version>-<digest>` identifier for the story file at
/// `path`.
///
/// Burns the first eight byte positions through a fresh generator, decodes
/// the version number, then digests the remainder of the file from the
/// current read position to end-of-file.
pub fn story_id(path: &Path) -> Result<StoryId> {
    let mut file = open(path)?;
    let mut header = [0u8; HEADER_LEN];
    read_full(&mut file, &mut header)?;
    if !is_adrift(&header) {
        return Err(IdentError::UnrecognizedFormat { format: "ADRIFT" });
    }

    let mut rng = VbRng::new();
    rng.burn(8);
    let version = version_code(&header, &mut rng)?;
    let digest = sha256_hex_to_end(&mut file)?;
    debug!(version, "adrift story identified");
    Ok(StoryId::new(format!("ADRIFT-{version:03}-{digest}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // "Version" plus version 4.93, obfuscated against the reference
    // keystream.
    const TAF_HEADER: [u8; 12] = [
        0x3C, 0x42, 0x3F, 0xC9, 0x6A, 0x87, 0xC2, 0xEF, 0x93, 0x6B, 0x37, 0x62,
    ];

    #[test]
    fn recognizes_obfuscated_signature() {
        assert!(is_adrift(&TAF_HEADER));
    }

    #[test]
    fn rejects_other_prefixes() {
        let mut header = TAF_HEADER;
        header[0] ^= 0x01;
        assert!(!is_adrift(&header));
        assert!(!is_adrift(b"Version 4.93"));
    }

    #[test]
    fn rejects_short_headers() {
        assert!(!is_adrift(&TAF_HEADER[..11]));
        assert!(!is_adrift(&[]));
    }

    #[test]
    fn decodes_version_after_signature_check() {
        let mut rng = VbRng::new();
        for &byte in &TAF_HEADER[..7] {
            let _ = rng.translate(byte);
        }
        rng.burn(1);
        assert_eq!(version_code(&TAF_HEADER, &mut rng).unwrap(), 493);
    }

    #[test]
    fn decodes_version_after_burning_eight() {
        let mut rng = VbRng::new();
        rng.burn(8);
        assert_eq!(version_code(&TAF_HEADER, &mut rng).unwrap(), 493);
    }

    #[test]
    fn version_must_be_digits() {
        let mut header = TAF_HEADER;
        // 0xFF at byte 8 translates to a non-digit
        header[8] = 0xFF;
        let mut rng = VbRng::new();
        rng.burn(8);
        assert!(matches!(
            version_code(&header, &mut rng),
            Err(IdentError::BadVersionDigits)
        ));
    }

    #[test]
    fn playable_below_version_500() {
        assert!(is_playable(&TAF_HEADER));

        // Same signature, version 5.00
        let mut adrift5 = TAF_HEADER;
        adrift5[8] = 0x92;
        adrift5[10] = 0x3E;
        adrift5[11] = 0x61;
        assert!(is_adrift(&adrift5));
        assert!(!is_playable(&adrift5));
    }
}
