//! Request authentication flow
//!
//! Two structurally identical signature checks gate submission, keyed by
//! distinct headers and distinct principal secrets:
//!   - `CHUserSign` — signature by the user secret
//!   - `CHDevSign`  — signature by the device secret
//!
//! Both fail closed: a missing header or an empty secret is a verification
//! failure, never an error. Signature verification must succeed strictly
//! before any envelope decryption — [`AuthorizedRequest`] is the only type
//! exposing decryption, so the ordering holds by construction.

use http::HeaderMap;

use pl_crypto::{sign, MasterKey};
use pl_proto::{Envelope, Token};

use crate::error::GatewayError;

/// Header carrying the user-principal signature.
pub const USER_SIGN_HEADER: &str = "CHUserSign";
/// Header carrying the device-principal signature.
pub const DEVICE_SIGN_HEADER: &str = "CHDevSign";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    User,
    Device,
}

/// Verify the user-principal signature over `message`. Fails closed on a
/// missing header or an empty secret.
pub fn verify_user(headers: &HeaderMap, message: &[u8], secret: &[u8]) -> bool {
    verify_header(headers, USER_SIGN_HEADER, message, secret)
}

/// Verify the device-principal signature over `message`. Same fail-closed
/// rule as [`verify_user`].
pub fn verify_device(headers: &HeaderMap, message: &[u8], secret: &[u8]) -> bool {
    verify_header(headers, DEVICE_SIGN_HEADER, message, secret)
}

fn verify_header(headers: &HeaderMap, name: &str, message: &[u8], secret: &[u8]) -> bool {
    let signature = headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    sign::verify_sign(signature, message, secret)
}

/// Per-request authentication driver. Secrets are read-only after
/// configuration load and safe to share across workers.
pub struct Authenticator {
    user_secret: Vec<u8>,
    device_secret: Vec<u8>,
}

impl Authenticator {
    pub fn new(user_secret: Vec<u8>, device_secret: Vec<u8>) -> Self {
        Self { user_secret, device_secret }
    }

    /// Run the full authentication flow for one request:
    /// decode the token, then verify the user signature, falling back to
    /// the device signature. Every failure maps to the same generic
    /// [`GatewayError::Unauthorized`].
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        token_param: &str,
        body: &[u8],
    ) -> Result<AuthorizedRequest, GatewayError> {
        let token = Token::decode(token_param).map_err(|_| {
            tracing::debug!("rejected: token decode failed");
            GatewayError::Unauthorized
        })?;

        let principal = if verify_user(headers, body, &self.user_secret) {
            Principal::User
        } else if verify_device(headers, body, &self.device_secret) {
            Principal::Device
        } else {
            tracing::debug!(user = %token.user_id(), "rejected: signature verification failed");
            return Err(GatewayError::Unauthorized);
        };

        Ok(AuthorizedRequest { token, principal, body: body.to_vec() })
    }
}

/// A request that passed token decode and signature verification.
///
/// Holding one is the proof of authorization: envelope decryption is only
/// reachable through [`AuthorizedRequest::open_envelope`].
#[derive(Debug)]
pub struct AuthorizedRequest {
    token: Token,
    principal: Principal,
    body: Vec<u8>,
}

impl AuthorizedRequest {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn principal(&self) -> Principal {
        self.principal
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decrypt and decode the outer envelope body. Returns the envelope
    /// and the millisecond timestamp it was bound to. Any failure —
    /// truncation, tag mismatch, wrong key — surfaces as the same generic
    /// rejection.
    pub fn open_envelope(&self, key: &MasterKey) -> Result<(Envelope, u64), GatewayError> {
        Envelope::open_data(key, &self.body).map_err(|e| {
            tracing::debug!(error = %e, "rejected: envelope decryption failed");
            GatewayError::Unauthorized
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn missing_header_fails_closed() {
        let headers = HeaderMap::new();
        assert!(!verify_user(&headers, b"body", b"secret"));
        assert!(!verify_device(&headers, b"body", b"secret"));
    }

    #[test]
    fn empty_secret_fails_closed() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_SIGN_HEADER, HeaderValue::from_static("*****"));
        assert!(!verify_user(&headers, b"body", b""));

        let mut headers = HeaderMap::new();
        headers.insert(DEVICE_SIGN_HEADER, HeaderValue::from_static("*****"));
        assert!(!verify_device(&headers, b"body", b""));
    }

    #[test]
    fn valid_user_signature_verifies() {
        let secret = b"user-secret";
        let sig = sign::sign(b"body", secret);
        let mut headers = HeaderMap::new();
        headers.insert(USER_SIGN_HEADER, HeaderValue::from_str(&sig).unwrap());
        assert!(verify_user(&headers, b"body", secret));
        // Same header does not satisfy the device check.
        assert!(!verify_device(&headers, b"body", secret));
    }

    #[test]
    fn tampered_body_fails() {
        let secret = b"user-secret";
        let sig = sign::sign(b"body", secret);
        let mut headers = HeaderMap::new();
        headers.insert(USER_SIGN_HEADER, HeaderValue::from_str(&sig).unwrap());
        assert!(!verify_user(&headers, b"tampered", secret));
    }
}
