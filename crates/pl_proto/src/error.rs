use thiserror::Error;

use pl_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum ProtoError {
    /// Single opaque failure for every token decode problem (malformed
    /// base64, schema decode failure, structurally incomplete record).
    /// The cause is deliberately not carried — callers must not be able
    /// to distinguish why a token was rejected.
    #[error("Invalid token")]
    InvalidToken,

    /// Decrypted body did not decode as an envelope record. Only reachable
    /// after a successful tag check, so this indicates a peer bug rather
    /// than tampering.
    #[error("Malformed envelope record")]
    MalformedEnvelope,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
