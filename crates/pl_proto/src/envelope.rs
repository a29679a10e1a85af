//! Notification envelope — builder, content encryption, body encryption
//!
//! An `Envelope` owns exactly one content record: either plaintext encoded
//! `MsgContent` bytes or an AEAD ciphertext blob, never both. The
//! plaintext → ciphertext transition is one-way; there is no in-place
//! decrypt.
//!
//! Wire formats:
//!   content ciphertext:  nonce(12 random) || ciphertext || tag
//!   outer request body:  nonce(12 deterministic) || ciphertext || tag
//!     where nonce = 0x01 0x01 0x00 0x08 || be64(timestamp_millis)
//!
//! The outer nonce is deterministic BY DESIGN: it binds each body to one
//! millisecond timestamp. Callers must encrypt at most one envelope per
//! (key, timestamp) pair — GCM nonce reuse leaks the auth key stream.

use chrono::{DateTime, Utc};
use prost::Message as _;

use pl_crypto::{aead, CryptoError, MasterKey};

use crate::content::{parse_actions, TimeItem};
use crate::error::ProtoError;
use crate::schema::{
    ChanCode, Channel, InterruptionLevel, Msg, MsgContent, MsgType, Sound, Thumbnail, TimeContent,
};
use crate::token::Token;

/// Flag prefix of the deterministic outer-body nonce.
const DATA_NONCE_PREFIX: [u8; 4] = [0x01, 0x01, 0x00, 0x08];

/// Well-known destination channels, resolved once at startup and passed
/// explicitly into the encode path (no ambient globals).
#[derive(Debug, Clone)]
pub struct ChannelDefaults {
    default: Vec<u8>,
    timeline: Vec<u8>,
}

impl ChannelDefaults {
    /// Encoded channel for payloads without an explicit destination.
    pub fn default_channel(&self) -> &[u8] {
        &self.default
    }

    /// Encoded channel for timeline payloads without an explicit destination.
    pub fn timeline_channel(&self) -> &[u8] {
        &self.timeline
    }
}

impl Default for ChannelDefaults {
    fn default() -> Self {
        let default = Channel { code: ChanCode::Uncategorized as i32, name: String::new() };
        let timeline = Channel { code: ChanCode::Timeline as i32, name: String::new() };
        Self {
            default: default.encode_to_vec(),
            timeline: timeline.encode_to_vec(),
        }
    }
}

/// Notification envelope under construction.
///
/// Content setters are fluent (`&mut Self`) so independent setters chain
/// before the terminal content call. Exactly one content-setting call is
/// expected per envelope; a second call silently overwrites the first
/// (last call wins).
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    wire: Msg,
    is_timeline: bool,
    /// Raw interruption-level string, retained even when translation fails.
    il_raw: String,
}

impl Envelope {
    /// New envelope bound to a decoded sender token.
    pub fn new(token: &Token) -> Self {
        Self {
            wire: Msg {
                from: Some(token.node_id().to_vec()),
                channel: token.channel().to_vec(),
                token_hash: token.hash_value(),
                ..Msg::default()
            },
            is_timeline: false,
            il_raw: String::new(),
        }
    }

    /// Strip the sender identity for privacy: clears `from` and the
    /// token-derived channel.
    pub fn disable_token(&mut self) -> &mut Self {
        self.wire.from = None;
        self.wire.channel.clear();
        self
    }

    // ── Content setters ──────────────────────────────────────────────────

    pub fn text_content(
        &mut self,
        text: &str,
        title: &str,
        copy_text: &str,
        auto_copy: bool,
    ) -> &mut Self {
        let mut ctx = MsgContent {
            msg_type: MsgType::Text as i32,
            text: text.to_string(),
            ..MsgContent::default()
        };
        if !title.is_empty() {
            ctx.title = title.to_string();
        }
        if !copy_text.is_empty() {
            ctx.copy_text = copy_text.to_string();
        }
        if auto_copy {
            ctx.flags = 1;
        }
        self.set_content(ctx)
    }

    pub fn link_content(&mut self, link: &str) -> &mut Self {
        self.set_content(MsgContent {
            msg_type: MsgType::Link as i32,
            link: link.to_string(),
            ..MsgContent::default()
        })
    }

    pub fn image_content(&mut self, path: &str, thumbnail: Option<Thumbnail>, size: u64) -> &mut Self {
        self.set_content(MsgContent {
            msg_type: MsgType::Image as i32,
            file: path.to_string(),
            size,
            thumbnail,
            ..MsgContent::default()
        })
    }

    pub fn file_content(
        &mut self,
        path: &str,
        filename: &str,
        desc: &str,
        size: u64,
        actions: &[String],
    ) -> &mut Self {
        let mut ctx = MsgContent {
            msg_type: MsgType::File as i32,
            file: path.to_string(),
            filename: filename.to_string(),
            size,
            actions: parse_actions(actions),
            ..MsgContent::default()
        };
        if !desc.is_empty() {
            ctx.text = desc.to_string();
        }
        self.set_content(ctx)
    }

    /// File content for text attachments: like `file_content` plus a title.
    pub fn text_file_content(
        &mut self,
        path: &str,
        filename: &str,
        title: &str,
        desc: &str,
        size: u64,
        actions: &[String],
    ) -> &mut Self {
        let mut ctx = MsgContent {
            msg_type: MsgType::File as i32,
            file: path.to_string(),
            filename: filename.to_string(),
            size,
            actions: parse_actions(actions),
            ..MsgContent::default()
        };
        if !title.is_empty() {
            ctx.title = title.to_string();
        }
        if !desc.is_empty() {
            ctx.text = desc.to_string();
        }
        self.set_content(ctx)
    }

    pub fn audio_content(
        &mut self,
        path: &str,
        filename: &str,
        title: &str,
        duration: u64,
        size: u64,
    ) -> &mut Self {
        self.set_content(MsgContent {
            msg_type: MsgType::Audio as i32,
            file: path.to_string(),
            filename: filename.to_string(),
            title: title.to_string(),
            duration,
            size,
            ..MsgContent::default()
        })
    }

    pub fn action_content(&mut self, text: &str, title: &str, actions: &[String]) -> &mut Self {
        let mut ctx = MsgContent {
            msg_type: MsgType::Action as i32,
            actions: parse_actions(actions),
            ..MsgContent::default()
        };
        if !title.is_empty() {
            ctx.title = title.to_string();
        }
        if !text.is_empty() {
            ctx.text = text.to_string();
        }
        self.set_content(ctx)
    }

    /// Timeline content. `ts` defaults to now; item values outside
    /// {i64, f64} are skipped.
    pub fn timeline_content(
        &mut self,
        code: &str,
        title: &str,
        ts: Option<DateTime<Utc>>,
        items: &[TimeItem],
    ) -> &mut Self {
        let time_items = items.iter().filter_map(TimeItem::to_wire).collect();
        let ts = ts.unwrap_or_else(Utc::now);
        let ctx = MsgContent {
            msg_type: MsgType::Timeline as i32,
            title: title.to_string(),
            time_content: Some(TimeContent {
                code: code.to_string(),
                timestamp: ts.timestamp_millis() as u64,
                time_items,
            }),
            ..MsgContent::default()
        };
        self.is_timeline = true;
        self.set_content(ctx)
    }

    // ── Metadata setters ─────────────────────────────────────────────────

    /// Set the notification sound. `""` and `"0"` mean "no explicit sound".
    pub fn sound_name(&mut self, sound: &str) -> &mut Self {
        if !sound.is_empty() && sound != "0" {
            self.wire.sound = Some(Sound { name: sound.to_string() });
        }
        self
    }

    /// Set delivery priority. Values outside (0, 0x7fffffff) exclusive are
    /// ignored and the field stays unset.
    pub fn set_priority(&mut self, priority: i32) -> &mut Self {
        if priority > 0 && priority < 0x7fff_ffff {
            self.wire.priority = priority;
        }
        self
    }

    /// Translate an interruption-level string. Unrecognized strings leave
    /// the wire field unset, but the raw string is always retained.
    pub fn set_interruption_level(&mut self, level: &str) -> &mut Self {
        self.il_raw = level.to_string();
        match level {
            "active" => self.wire.interruption_level = InterruptionLevel::Active as i32,
            "passive" => self.wire.interruption_level = InterruptionLevel::Passive as i32,
            "time-sensitive" => {
                self.wire.interruption_level = InterruptionLevel::TimeSensitive as i32
            }
            _ => {}
        }
        self
    }

    pub fn set_timeline(&mut self, timeline: bool) -> &mut Self {
        self.is_timeline = timeline;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn is_timeline(&self) -> bool {
        self.is_timeline
    }

    pub fn from(&self) -> Option<&[u8]> {
        self.wire.from.as_deref()
    }

    pub fn channel(&self) -> &[u8] {
        &self.wire.channel
    }

    pub fn token_hash(&self) -> &[u8] {
        &self.wire.token_hash
    }

    pub fn priority(&self) -> i32 {
        self.wire.priority
    }

    pub fn sound(&self) -> Option<&str> {
        self.wire.sound.as_ref().map(|s| s.name.as_str())
    }

    /// Raw interruption-level string as supplied, translated or not.
    pub fn interruption_level_raw(&self) -> &str {
        &self.il_raw
    }

    /// Plaintext content bytes, if the envelope has not been sealed yet.
    pub fn content(&self) -> Option<&[u8]> {
        self.wire.content.as_deref()
    }

    /// Sealed content blob (`nonce || ciphertext || tag`), if present.
    pub fn ciphertext(&self) -> Option<&[u8]> {
        self.wire.ciphertext.as_deref()
    }

    // ── Encoding / encryption ────────────────────────────────────────────

    /// Canonical binary form of the whole envelope record.
    pub fn encode(&self) -> Vec<u8> {
        self.wire.encode_to_vec()
    }

    /// Seal the plaintext content in place under a fresh random nonce.
    ///
    /// Irreversible: the plaintext field is discarded. A no-op when no
    /// plaintext content is present.
    pub fn encrypt_content(&mut self, key: &MasterKey) -> Result<(), CryptoError> {
        let Some(content) = self.wire.content.take() else {
            return Ok(());
        };
        let nonce = aead::random_nonce();
        let sealed = match aead::seal(key.cipher_key(), &nonce, &content, key.aad()) {
            Ok(sealed) => sealed,
            Err(e) => {
                // A failed seal must not leave the envelope half-transitioned.
                self.wire.content = Some(content);
                return Err(e);
            }
        };
        let mut blob = Vec::with_capacity(aead::NONCE_LEN + sealed.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&sealed);
        self.wire.ciphertext = Some(blob);
        Ok(())
    }

    /// Seal the entire envelope as an outer request body keyed by a
    /// per-request millisecond timestamp.
    ///
    /// Applies the default-channel rule first, then encodes the record
    /// (content in whatever state it is in, plaintext or sealed) and seals
    /// it under the deterministic timestamp nonce. Caller contract: at
    /// most one envelope per (key, ts_millis).
    pub fn encrypt_data(
        &mut self,
        key: &MasterKey,
        ts_millis: u64,
        defaults: &ChannelDefaults,
    ) -> Result<Vec<u8>, CryptoError> {
        self.fix_channel(defaults);
        let nonce = data_nonce(ts_millis);
        let sealed = aead::seal(key.cipher_key(), &nonce, &self.encode(), key.aad())?;
        let mut out = Vec::with_capacity(aead::NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Open an outer request body produced by [`Envelope::encrypt_data`].
    ///
    /// Returns the decoded envelope and the timestamp the body was bound
    /// to. Truncation, a wrong flag prefix, a wrong key, and a tag
    /// mismatch are indistinguishable (`AeadDecrypt`).
    pub fn open_data(key: &MasterKey, data: &[u8]) -> Result<(Self, u64), ProtoError> {
        if data.len() < aead::NONCE_LEN || data[..4] != DATA_NONCE_PREFIX {
            return Err(CryptoError::AeadDecrypt.into());
        }
        let mut nonce = [0u8; aead::NONCE_LEN];
        nonce.copy_from_slice(&data[..aead::NONCE_LEN]);
        let mut ts_bytes = [0u8; 8];
        ts_bytes.copy_from_slice(&data[4..12]);
        let ts_millis = u64::from_be_bytes(ts_bytes);

        let plaintext = aead::open(key.cipher_key(), &nonce, &data[aead::NONCE_LEN..], key.aad())?;
        let wire = Msg::decode(&plaintext[..]).map_err(|_| ProtoError::MalformedEnvelope)?;
        let il_raw = match InterruptionLevel::try_from(wire.interruption_level) {
            Ok(InterruptionLevel::Active) => "active",
            Ok(InterruptionLevel::Passive) => "passive",
            Ok(InterruptionLevel::TimeSensitive) => "time-sensitive",
            Err(_) => "",
        }
        .to_string();
        Ok((Self { wire, is_timeline: false, il_raw }, ts_millis))
    }

    fn set_content(&mut self, ctx: MsgContent) -> &mut Self {
        self.wire.content = Some(ctx.encode_to_vec());
        self
    }

    /// Default-channel rule: an unset channel becomes the well-known
    /// timeline channel for timeline payloads, else the default channel.
    fn fix_channel(&mut self, defaults: &ChannelDefaults) {
        if self.wire.channel.is_empty() {
            self.wire.channel = if self.is_timeline {
                defaults.timeline_channel().to_vec()
            } else {
                defaults.default_channel().to_vec()
            };
        }
    }
}

/// Deterministic outer-body nonce: flag prefix plus big-endian timestamp.
fn data_nonce(ts_millis: u64) -> [u8; aead::NONCE_LEN] {
    let mut nonce = [0u8; aead::NONCE_LEN];
    nonce[..4].copy_from_slice(&DATA_NONCE_PREFIX);
    nonce[4..].copy_from_slice(&ts_millis.to_be_bytes());
    nonce
}
