//! pl_proto — Wire schema, content model, envelope, and token codec
//!
//! All on-wire records use the hand-written, versioned protobuf schema in
//! `schema` — the encoded bytes are what gets encrypted, never the
//! in-memory structures.
//!
//! # Modules
//! - `schema`   — frozen v1 wire messages and enumerations
//! - `content`  — content helpers (action parsing, timeline item values)
//! - `envelope` — notification envelope: builder, content + body encryption
//! - `token`    — sender identity token decoded from the request path
//! - `error`    — unified error type

pub mod content;
pub mod envelope;
pub mod error;
pub mod schema;
pub mod token;

pub use content::TimeItem;
pub use envelope::{ChannelDefaults, Envelope};
pub use error::ProtoError;
pub use token::Token;
