//! pl_crypto — Pushlane cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - Verification failures are opaque: one error for tag mismatch, wrong
//!   key, and truncated input.
//!
//! # Module layout
//! - `keys`  — 64-byte master key material (cipher half + AAD half)
//! - `aead`  — AES-256-GCM seal/open helpers
//! - `sign`  — HMAC-SHA256 request signatures with constant-time verify
//! - `hash`  — SHA-256 token hashing
//! - `error` — unified error type

pub mod aead;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use error::CryptoError;
pub use keys::MasterKey;
