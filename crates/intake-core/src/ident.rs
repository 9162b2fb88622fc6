//! Random identifier generation
//!
//! Stored file names come from here, so the source must be the OS CSPRNG:
//! names generated with a clock-seeded PRNG would be guessable by anyone
//! racing to collide with another upload.

use rand_core::{OsRng, RngCore};

/// Fixed 64-character alphabet for generated identifiers.
pub const ALPHABET: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+";

/// Length of generated stored file names.
pub const STORED_NAME_LEN: usize = 25;

/// Generate a random identifier of exactly `len` characters drawn
/// uniformly from [`ALPHABET`]. A zero length yields an empty string.
///
/// The alphabet length divides 256, so masking a random byte to six bits
/// is an exactly uniform draw.
pub fn random_name(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_exact() {
        for len in [0, 1, 7, 25, 100] {
            assert_eq!(random_name(len).len(), len);
        }
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert_eq!(random_name(0), "");
    }

    #[test]
    fn test_characters_come_from_alphabet() {
        let name = random_name(512);
        for c in name.bytes() {
            assert!(ALPHABET.contains(&c), "unexpected character {:?}", c as char);
        }
    }

    #[test]
    fn test_successive_names_differ() {
        // 25 characters of 6-bit entropy; a collision here means the
        // generator is broken, not unlucky.
        assert_ne!(random_name(25), random_name(25));
    }
}
