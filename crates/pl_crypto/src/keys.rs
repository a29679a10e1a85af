//! Master key material
//!
//! The gateway secret is exactly 64 bytes, consumed as two fixed halves:
//!   - bytes [0..32]  — AES-256-GCM cipher key
//!   - bytes [32..64] — additional authenticated data bound into the tag
//!
//! The AAD half is not itself secret, but it must match exactly on decrypt
//! or the tag check fails. The 64-byte total and the half boundaries are a
//! wire-protocol invariant; changing either breaks interoperability.

use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// 64-byte master secret, split once at construction. Drop clears memory.
#[derive(ZeroizeOnDrop)]
pub struct MasterKey {
    cipher_key: [u8; 32],
    aad: [u8; 32],
}

impl MasterKey {
    /// Required key material length in bytes.
    pub const LEN: usize = 64;

    /// Build from raw bytes. Any length other than 64 is a configuration
    /// error — callers treat this as fatal at startup, never per-request.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != Self::LEN {
            return Err(CryptoError::KeyMaterial(format!(
                "Master key must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let mut cipher_key = [0u8; 32];
        let mut aad = [0u8; 32];
        cipher_key.copy_from_slice(&bytes[..32]);
        aad.copy_from_slice(&bytes[32..]);
        Ok(Self { cipher_key, aad })
    }

    /// Symmetric cipher key (first half).
    pub fn cipher_key(&self) -> &[u8; 32] {
        &self.cipher_key
    }

    /// Additional authenticated data (second half).
    pub fn aad(&self) -> &[u8; 32] {
        &self.aad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_64_byte_key_at_fixed_boundary() {
        let mut raw = [0u8; 64];
        for (i, b) in raw.iter_mut().enumerate() {
            *b = i as u8;
        }
        let key = MasterKey::from_bytes(&raw).unwrap();
        assert_eq!(key.cipher_key()[0], 0);
        assert_eq!(key.cipher_key()[31], 31);
        assert_eq!(key.aad()[0], 32);
        assert_eq!(key.aad()[31], 63);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(MasterKey::from_bytes(&[0u8; 32]).is_err());
        assert!(MasterKey::from_bytes(&[0u8; 63]).is_err());
        assert!(MasterKey::from_bytes(&[0u8; 65]).is_err());
        assert!(MasterKey::from_bytes(&[]).is_err());
    }
}
