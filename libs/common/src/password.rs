//! One-way password hashing
//!
//! Passwords are stored as the lowercase hex SHA-1 digest of their UTF-8
//! bytes. The digest is deterministic and always 40 characters long.

use sha1::{Digest, Sha1};

/// Hash a plaintext password
pub fn hash_password(plaintext: &str) -> String {
    hex::encode(Sha1::digest(plaintext.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST_LEN: usize = 40;

    #[test]
    fn test_hash_known_vectors() {
        assert_eq!(hash_password(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            hash_password("abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_hash_is_deterministic_and_fixed_length() {
        let first = hash_password("123456");
        let second = hash_password("123456");
        assert_eq!(first, second);
        assert_eq!(first.len(), DIGEST_LEN);
        assert_ne!(first, "123456");
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_handles_non_ascii() {
        let digest = hash_password("contraseña ✓");
        assert_eq!(digest.len(), DIGEST_LEN);
        assert_ne!(digest, hash_password("contrasena ✓"));
    }
}
