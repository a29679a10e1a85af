//! pl_gateway — Request authentication and gateway configuration
//!
//! The gateway authenticates a request before anything else happens:
//!
//! ```text
//! Unverified → TokenDecoded → {UserVerified | DeviceVerified} → Authorized
//! ```
//!
//! Any step failing transitions to Rejected and short-circuits — content
//! decryption never runs for a request that fails verification, and the
//! caller only ever sees one generic rejection (no oracle on whether the
//! token, the signature, or the key was at fault).
//!
//! # Modules
//! - `auth`   — signature headers, the authorization flow, `AuthorizedRequest`
//! - `config` — startup-time key material validation
//! - `media`  — image content-type tagging (PNG/JPEG magic bytes)
//! - `error`  — unified error type

pub mod auth;
pub mod config;
pub mod error;
pub mod media;

pub use auth::{Authenticator, AuthorizedRequest, Principal};
pub use config::GatewayConfig;
pub use error::GatewayError;
