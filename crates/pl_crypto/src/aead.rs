//! Authenticated Encryption with Associated Data
//!
//! Uses AES-256-GCM.
//! Key size: 32 bytes.  Nonce: 12 bytes.  Tag: 16 bytes.
//!
//! Nonces are supplied by the caller: envelope content uses a random nonce,
//! the outer request body uses a deterministic timestamp-derived nonce.
//! Nonce reuse under GCM is catastrophic — the caller owns uniqueness.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Nonce length shared by both use sites.
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte key and a caller-supplied 12-byte
/// nonce. Returns `ciphertext || tag` (nonce NOT prepended — the two use
/// sites frame it differently).
pub fn seal(
    key: &[u8; 32],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::AeadEncrypt)?;
    cipher
        .encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
        .map_err(|_| CryptoError::AeadEncrypt)
}

/// Decrypt `ciphertext || tag`. A tag mismatch, a wrong key, and a wrong
/// AAD all surface as the same `AeadDecrypt` error.
pub fn open(
    key: &[u8; 32],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::AeadDecrypt)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad })
        .map_err(|_| CryptoError::AeadDecrypt)?;
    Ok(Zeroizing::new(plaintext))
}

/// Fresh random 12-byte nonce from the OS CSPRNG (safe for concurrent use).
pub fn random_nonce() -> [u8; NONCE_LEN] {
    use rand::RngCore;
    let mut nonce = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    nonce
}
