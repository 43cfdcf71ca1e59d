// src/codec/digest.rs
use sha2::{Digest, Sha256};

/// Demonstration hash: folds UTF-16 code units into a wrapping `i32`
/// (`acc * 31 + unit`) and prints the magnitude in lowercase hex.
///
/// Not collision resistant and not meant to be.
pub fn toy_hash(text: &str) -> String {
    let acc = text.encode_utf16().fold(0i32, |acc, unit| {
        (acc << 5).wrapping_sub(acc).wrapping_add(unit as i32)
    });
    format!("{:x}", acc.unsigned_abs())
}

/// SHA-256 over the UTF-8 bytes, lowercase hex, two digits per byte.
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toy_hash_matches_known_values() {
        assert_eq!(toy_hash(""), "0");
        assert_eq!(toy_hash("a"), "61");
        // 97 * 31 + 98
        assert_eq!(toy_hash("ab"), format!("{:x}", 97 * 31 + 98));
        // "hello".hashCode() == 99162322
        assert_eq!(toy_hash("hello"), format!("{:x}", 99162322));
    }

    #[test]
    fn toy_hash_wraps_to_32_bits() {
        // "polygenelubricants".hashCode() == i32::MIN
        assert_eq!(toy_hash("polygenelubricants"), "80000000");
        assert_eq!(toy_hash("Hello, World!"), "5955b815");
    }

    #[test]
    fn toy_hash_folds_utf16_units() {
        // U+1F980 is two surrogate units, so it differs from hashing the scalar
        let crab = toy_hash("🦀");
        let expected = (0xD83Ei32 * 31).wrapping_add(0xDD80);
        assert_eq!(crab, format!("{:x}", expected.unsigned_abs()));
        assert_eq!(toy_hash("🦀"), crab);
    }

    #[test]
    fn sha256_is_standard() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    proptest! {
        #[test]
        fn toy_hash_is_stable_short_hex(text in any::<String>()) {
            let hash = toy_hash(&text);
            prop_assert_eq!(&hash, &toy_hash(&text));
            prop_assert!(!hash.is_empty() && hash.len() <= 8);
            prop_assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
