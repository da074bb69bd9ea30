//! Fixed-length key digests.
//!
//! Some cache stores cap key length. For those, the canonical string can be
//! reduced to a SHA-256 digest; the canonical string stays the source of
//! truth and the digest is derived from it alone.

use sha2::{Digest, Sha256};

use crate::key::CanonicalString;

/// Length of a hex digest in characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of the canonical key, as 64 lowercase hex characters.
pub fn sha256_hex(key: &CanonicalString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_str().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::derive_key;
    use crate::value::ArgValue;

    #[test]
    fn test_digest_of_empty_array() {
        let key = derive_key(&ArgValue::array(Vec::new())).unwrap();
        // sha256("[]")
        assert_eq!(
            sha256_hex(&key),
            "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
        );
    }

    #[test]
    fn test_digest_shape() {
        let key = derive_key(&ArgValue::object([("source", ArgValue::from("npub1"))])).unwrap();
        let digest = sha256_hex(&key);
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_equal_keys_equal_digests() {
        let a = ArgValue::object([("a", ArgValue::Int(1)), ("b", ArgValue::Float(2.0))]);
        let b = ArgValue::object([("b", ArgValue::Int(2)), ("a", ArgValue::Int(1))]);
        assert_eq!(
            sha256_hex(&derive_key(&a).unwrap()),
            sha256_hex(&derive_key(&b).unwrap())
        );
    }
}
