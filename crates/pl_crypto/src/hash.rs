//! SHA-256 hash utilities
//!
//! The token hash binds an envelope to the sender's token without
//! re-exposing the token itself: the gateway stores H(token) on the
//! envelope and never retains the raw credential.

use sha2::{Digest, Sha256};

/// One-way hash of the raw token text.
pub fn token_hash(raw: &[u8]) -> Vec<u8> {
    Sha256::digest(raw).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_sha256() {
        // SHA-256("abc")
        assert_eq!(
            hex::encode(token_hash(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
