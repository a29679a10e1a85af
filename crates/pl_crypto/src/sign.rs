//! Request signatures — HMAC-SHA256 over the request body
//!
//! Signatures travel base64url-encoded (no padding) in the `CHUserSign` /
//! `CHDevSign` headers. Verification fails closed: an empty signature or an
//! empty key is never valid ("no signature required" does not exist).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature for `message` under `key`, base64url-encoded.
/// Used by clients and by tests; the gateway only ever verifies.
pub fn sign(message: &[u8], key: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(message);
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Verify a supplied signature against the expected HMAC of `message`.
///
/// Returns false (never errors) on: empty signature, empty key, malformed
/// base64, or MAC mismatch. The comparison is constant-time — a byte-wise
/// early-exit compare would be a timing side channel.
pub fn verify_sign(signature: &str, message: &[u8], key: &[u8]) -> bool {
    if signature.is_empty() || key.is_empty() {
        return false;
    }
    let supplied = match URL_SAFE_NO_PAD.decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let mut mac = match HmacSha256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(message);
    // verify_slice is constant-time (subtle::ConstantTimeEq under the hood)
    mac.verify_slice(&supplied).is_ok()
}
