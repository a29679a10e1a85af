//! Frozen v1 wire schema
//!
//! Hand-written protobuf messages (prost derive, no codegen). Tag numbers
//! are frozen: the encoded form of these records is what gets encrypted
//! and what remote peers parse, so renumbering a field is a wire break.
//! New fields get new tags; existing tags never change meaning.

use prost::{Enumeration, Message};

/// Schema version carried implicitly by the tag layout below.
pub const SCHEMA_VERSION: u32 = 1;

// ── Enumerations ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum MsgType {
    None = 0,
    Text = 1,
    Link = 2,
    Image = 3,
    File = 4,
    Audio = 5,
    Action = 6,
    Timeline = 7,
}

/// Timeline item value kind. Anything the builder cannot coerce to one of
/// these is dropped before encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum ValueType {
    Integer = 0,
    Double = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum ActType {
    Url = 0,
}

/// Notification interruption level. `Active` doubles as "unset" — an
/// unrecognized level string leaves the wire field at its default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum InterruptionLevel {
    Active = 0,
    Passive = 1,
    TimeSensitive = 2,
}

/// Well-known channel codes. `None = 0` is reserved so that a well-known
/// channel never encodes to zero bytes (which would collide with "unset").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum ChanCode {
    None = 0,
    Uncategorized = 1,
    Timeline = 2,
}

// ── Content messages ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ActionItem {
    #[prost(enumeration = "ActType", tag = "1")]
    pub act_type: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub link: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct TimeItem {
    #[prost(enumeration = "ValueType", tag = "1")]
    pub value_type: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int64, tag = "3")]
    pub integer_value: i64,
    #[prost(double, tag = "4")]
    pub double_value: f64,
}

#[derive(Clone, PartialEq, Message)]
pub struct TimeContent {
    #[prost(string, tag = "1")]
    pub code: String,
    /// Milliseconds since the Unix epoch.
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    #[prost(message, repeated, tag = "3")]
    pub time_items: Vec<TimeItem>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Thumbnail {
    #[prost(int32, tag = "1")]
    pub width: i32,
    #[prost(int32, tag = "2")]
    pub height: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Sound {
    #[prost(string, tag = "1")]
    pub name: String,
}

/// Serialized per content kind; only the fields relevant to the kind are
/// populated (proto3 defaults are omitted on the wire).
#[derive(Clone, PartialEq, Message)]
pub struct MsgContent {
    #[prost(enumeration = "MsgType", tag = "1")]
    pub msg_type: i32,
    #[prost(string, tag = "2")]
    pub text: String,
    #[prost(string, tag = "3")]
    pub title: String,
    #[prost(string, tag = "4")]
    pub copy_text: String,
    #[prost(string, tag = "5")]
    pub link: String,
    /// Bit 0: auto-copy the copy text on delivery.
    #[prost(uint64, tag = "6")]
    pub flags: u64,
    #[prost(string, tag = "7")]
    pub file: String,
    #[prost(string, tag = "8")]
    pub filename: String,
    #[prost(uint64, tag = "9")]
    pub size: u64,
    /// Audio duration in seconds.
    #[prost(uint64, tag = "10")]
    pub duration: u64,
    #[prost(message, repeated, tag = "11")]
    pub actions: Vec<ActionItem>,
    #[prost(message, optional, tag = "12")]
    pub thumbnail: Option<Thumbnail>,
    #[prost(message, optional, tag = "13")]
    pub time_content: Option<TimeContent>,
}

// ── Routing messages ─────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct Channel {
    #[prost(enumeration = "ChanCode", tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub name: String,
}

/// The outer envelope record: routing metadata plus content, which is
/// either an encoded `MsgContent` (`content`) or an AEAD blob
/// (`ciphertext`) — never both.
#[derive(Clone, PartialEq, Message)]
pub struct Msg {
    /// Sender node identity; cleared entirely when the token is stripped.
    #[prost(bytes = "vec", optional, tag = "1")]
    pub from: Option<Vec<u8>>,
    /// Destination channel (encoded `Channel`); empty means "apply the
    /// default-channel rule at encode time".
    #[prost(bytes = "vec", tag = "2")]
    pub channel: Vec<u8>,
    /// Plaintext content: encoded `MsgContent`.
    #[prost(bytes = "vec", optional, tag = "3")]
    pub content: Option<Vec<u8>>,
    /// Encrypted content: `nonce(12) || ciphertext || tag`.
    #[prost(bytes = "vec", optional, tag = "4")]
    pub ciphertext: Option<Vec<u8>>,
    /// Delivery priority; zero means unset.
    #[prost(int32, tag = "5")]
    pub priority: i32,
    /// SHA-256 of the sender's raw token.
    #[prost(bytes = "vec", tag = "6")]
    pub token_hash: Vec<u8>,
    #[prost(message, optional, tag = "7")]
    pub sound: Option<Sound>,
    #[prost(enumeration = "InterruptionLevel", tag = "8")]
    pub interruption_level: i32,
}

// ── Identity messages ────────────────────────────────────────────────────────

/// Decoded body of an identity token. A structurally complete record has a
/// non-empty `user_id` and a non-empty `channel`.
#[derive(Clone, PartialEq, Message)]
pub struct TokenRecord {
    /// Expiry, seconds since the Unix epoch (0 = no expiry).
    #[prost(uint64, tag = "1")]
    pub expires: u64,
    #[prost(string, tag = "2")]
    pub user_id: String,
    #[prost(string, tag = "3")]
    pub device_id: String,
    /// Destination channel (encoded `Channel`).
    #[prost(bytes = "vec", tag = "4")]
    pub channel: Vec<u8>,
    /// Sender node identity.
    #[prost(bytes = "vec", tag = "5")]
    pub node_id: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message as _;

    #[test]
    fn well_known_channels_never_encode_empty() {
        let default = Channel { code: ChanCode::Uncategorized as i32, name: String::new() };
        let timeline = Channel { code: ChanCode::Timeline as i32, name: String::new() };
        assert!(!default.encode_to_vec().is_empty());
        assert!(!timeline.encode_to_vec().is_empty());
        assert_ne!(default.encode_to_vec(), timeline.encode_to_vec());
    }

    #[test]
    fn msg_roundtrip_preserves_either_or_content() {
        let msg = Msg {
            from: Some(b"node".to_vec()),
            channel: vec![],
            content: Some(vec![1, 2, 3]),
            ciphertext: None,
            priority: 10,
            token_hash: vec![0xaa; 32],
            sound: Some(Sound { name: "bell".into() }),
            interruption_level: InterruptionLevel::TimeSensitive as i32,
        };
        let decoded = Msg::decode(msg.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.content.as_deref(), Some(&[1u8, 2, 3][..]));
        assert!(decoded.ciphertext.is_none());
        assert_eq!(decoded.priority, 10);
    }
}
