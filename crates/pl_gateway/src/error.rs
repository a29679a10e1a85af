use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Generic rejection for every authentication problem: bad token, bad
    /// signature, AEAD tag mismatch. The internal distinction is logged at
    /// debug level, never surfaced to the caller.
    #[error("request rejected")]
    Unauthorized,

    /// Fatal at startup, never per-request.
    #[error("invalid gateway configuration: {0}")]
    Config(String),
}
