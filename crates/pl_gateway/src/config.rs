//! Gateway configuration
//!
//! Key material is validated here, once, at startup — a wrong-length
//! secret is a fatal configuration error, never a per-request failure.
//! After load everything is read-only and safe to share across workers
//! without synchronization.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use pl_crypto::MasterKey;
use pl_proto::ChannelDefaults;

use crate::auth::Authenticator;
use crate::error::GatewayError;

pub struct GatewayConfig {
    master_key: MasterKey,
    authenticator: Authenticator,
    channels: ChannelDefaults,
}

impl GatewayConfig {
    /// Build from the configured base64url secret (64 bytes decoded) and
    /// the per-principal signing secrets.
    pub fn new(
        secret_b64: &str,
        user_secret: Vec<u8>,
        device_secret: Vec<u8>,
    ) -> Result<Self, GatewayError> {
        let raw = URL_SAFE_NO_PAD
            .decode(secret_b64)
            .map_err(|e| GatewayError::Config(format!("secret is not valid base64: {e}")))?;
        let master_key =
            MasterKey::from_bytes(&raw).map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self {
            master_key,
            authenticator: Authenticator::new(user_secret, device_secret),
            channels: ChannelDefaults::default(),
        })
    }

    pub fn master_key(&self) -> &MasterKey {
        &self.master_key
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn channels(&self) -> &ChannelDefaults {
        &self.channels
    }
}
