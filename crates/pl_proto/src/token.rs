//! Sender identity token
//!
//! Tokens arrive as a URL path segment of the form
//! `<base64url body>..<signature suffix>` — the body is an unpadded
//! base64url `TokenRecord`, the literal `..` marks an empty middle section,
//! and the trailing suffix is verified elsewhere. The raw text (separators
//! and suffix included) is what gets hashed to bind envelopes to the token.
//!
//! Decoded once per request; never persisted. Every decode failure —
//! malformed base64, schema decode failure, structurally incomplete
//! record — collapses into the single `InvalidToken` error so callers
//! cannot distinguish why a token was rejected.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use prost::Message as _;

use crate::error::ProtoError;
use crate::schema::TokenRecord;

/// Decoded sender identity.
#[derive(Debug, Clone)]
pub struct Token {
    raw: String,
    record: TokenRecord,
}

impl Token {
    /// Decode a raw path segment. A leading `/` (left over from wildcard
    /// route captures) is stripped; everything else is preserved verbatim
    /// as the hashed raw text.
    pub fn decode(raw_path_segment: &str) -> Result<Self, ProtoError> {
        let raw = raw_path_segment.strip_prefix('/').unwrap_or(raw_path_segment);
        let body = raw.split('.').next().unwrap_or("");
        let bytes = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| ProtoError::InvalidToken)?;
        let record = TokenRecord::decode(bytes.as_slice()).map_err(|_| ProtoError::InvalidToken)?;
        if record.user_id.is_empty() || record.channel.is_empty() {
            return Err(ProtoError::InvalidToken);
        }
        Ok(Self { raw: raw.to_string(), record })
    }

    /// Sender node identity.
    pub fn node_id(&self) -> &[u8] {
        &self.record.node_id
    }

    /// Token user id.
    pub fn user_id(&self) -> &str {
        &self.record.user_id
    }

    /// Destination channel (encoded `Channel` record).
    pub fn channel(&self) -> &[u8] {
        &self.record.channel
    }

    /// Expiry in seconds since the Unix epoch; 0 means no expiry.
    pub fn expires(&self) -> u64 {
        self.record.expires
    }

    /// One-way hash binding envelopes to this token without retaining it.
    pub fn hash_value(&self) -> Vec<u8> {
        pl_crypto::hash::token_hash(self.raw.as_bytes())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::schema::TokenRecord;

    fn encode_token(record: &TokenRecord, suffix: &str) -> String {
        format!("{}..{}", URL_SAFE_NO_PAD.encode(record.encode_to_vec()), suffix)
    }

    pub(crate) fn sample_token() -> Token {
        let record = TokenRecord {
            expires: 0,
            user_id: "123".into(),
            device_id: String::new(),
            channel: b"chan".to_vec(),
            node_id: b"node-a".to_vec(),
        };
        Token::decode(&encode_token(&record, "c2lnbg")).unwrap()
    }

    #[test]
    fn decode_well_formed_token() {
        let tk = sample_token();
        assert_eq!(tk.user_id(), "123");
        assert_eq!(tk.channel(), b"chan");
        assert_eq!(tk.node_id(), b"node-a");
    }

    #[test]
    fn leading_slash_is_stripped() {
        let record = TokenRecord {
            user_id: "u".into(),
            channel: b"c".to_vec(),
            ..TokenRecord::default()
        };
        let with_slash = format!("/{}", encode_token(&record, "sig"));
        let tk = Token::decode(&with_slash).unwrap();
        assert_eq!(tk.user_id(), "u");
    }

    #[test]
    fn hash_covers_raw_text_including_suffix() {
        let record = TokenRecord {
            user_id: "u".into(),
            channel: b"c".to_vec(),
            ..TokenRecord::default()
        };
        let a = Token::decode(&encode_token(&record, "sig-a")).unwrap();
        let b = Token::decode(&encode_token(&record, "sig-b")).unwrap();
        assert_ne!(a.hash_value(), b.hash_value());
        assert_eq!(a.hash_value().len(), 32);
    }

    #[test]
    fn malformed_base64_is_invalid() {
        assert!(matches!(
            Token::decode("!!!not-base64!!!..sig"),
            Err(ProtoError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_record_is_invalid() {
        let garbage = URL_SAFE_NO_PAD.encode([0xff, 0xff, 0xff, 0xff]);
        assert!(Token::decode(&format!("{garbage}..sig")).is_err());
    }

    #[test]
    fn missing_channel_is_invalid() {
        let record = TokenRecord { user_id: "123".into(), ..TokenRecord::default() };
        assert!(matches!(
            Token::decode(&encode_token(&record, "sig")),
            Err(ProtoError::InvalidToken)
        ));
    }

    #[test]
    fn missing_user_id_is_invalid() {
        let record = TokenRecord { channel: b"chan".to_vec(), ..TokenRecord::default() };
        assert!(Token::decode(&encode_token(&record, "sig")).is_err());
    }

    #[test]
    fn empty_input_is_invalid() {
        // "" base64-decodes to zero bytes; the record is then structurally
        // incomplete.
        assert!(Token::decode("").is_err());
        assert!(Token::decode("..").is_err());
    }
}
