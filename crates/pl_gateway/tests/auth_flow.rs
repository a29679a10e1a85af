//! End-to-end authorization flow: token decode → signature verification →
//! envelope decryption, with every failure collapsing into one generic
//! rejection.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use http::{HeaderMap, HeaderValue};
use prost::Message as _;

use pl_crypto::{sign, MasterKey};
use pl_gateway::auth::{DEVICE_SIGN_HEADER, USER_SIGN_HEADER};
use pl_gateway::{Authenticator, GatewayError, Principal};
use pl_proto::schema::{MsgContent, TokenRecord};
use pl_proto::{ChannelDefaults, Envelope, Token};

const USER_SECRET: &[u8] = b"user-shared-secret";
const DEVICE_SECRET: &[u8] = b"device-shared-secret";

fn master_key() -> MasterKey {
    let mut raw = [0u8; 64];
    for (i, b) in raw.iter_mut().enumerate() {
        *b = (i * 3) as u8;
    }
    MasterKey::from_bytes(&raw).unwrap()
}

fn token_param() -> String {
    let record = TokenRecord {
        expires: 0,
        user_id: "u-1".into(),
        device_id: "d-1".into(),
        channel: b"alerts".to_vec(),
        node_id: b"node-1".to_vec(),
    };
    format!("{}..c2lnbg", URL_SAFE_NO_PAD.encode(record.encode_to_vec()))
}

fn encrypted_body(key: &MasterKey, ts: u64) -> Vec<u8> {
    let token = Token::decode(&token_param()).unwrap();
    let mut env = Envelope::new(&token);
    env.text_content("build finished", "CI", "", false)
        .set_priority(5)
        .sound_name("bell");
    env.encrypt_data(key, ts, &ChannelDefaults::default()).unwrap()
}

fn signed_headers(header: &str, body: &[u8], secret: &[u8]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let sig = sign::sign(body, secret);
    headers.insert(
        http::HeaderName::from_bytes(header.as_bytes()).unwrap(),
        HeaderValue::from_str(&sig).unwrap(),
    );
    headers
}

#[test]
fn user_signed_request_is_authorized_and_decrypts() {
    let key = master_key();
    let auth = Authenticator::new(USER_SECRET.to_vec(), DEVICE_SECRET.to_vec());
    let body = encrypted_body(&key, 1_700_000_000_000);
    let headers = signed_headers(USER_SIGN_HEADER, &body, USER_SECRET);

    let req = auth.authorize(&headers, &token_param(), &body).unwrap();
    assert_eq!(req.principal(), Principal::User);
    assert_eq!(req.token().user_id(), "u-1");

    let (env, ts) = req.open_envelope(&key).unwrap();
    assert_eq!(ts, 1_700_000_000_000);
    assert_eq!(env.channel(), b"alerts");
    assert_eq!(env.priority(), 5);
    let ctx = MsgContent::decode(env.content().unwrap()).unwrap();
    assert_eq!(ctx.text, "build finished");
}

#[test]
fn device_signature_is_the_fallback_principal() {
    let key = master_key();
    let auth = Authenticator::new(USER_SECRET.to_vec(), DEVICE_SECRET.to_vec());
    let body = encrypted_body(&key, 1);
    let headers = signed_headers(DEVICE_SIGN_HEADER, &body, DEVICE_SECRET);

    let req = auth.authorize(&headers, &token_param(), &body).unwrap();
    assert_eq!(req.principal(), Principal::Device);
}

#[test]
fn bad_token_is_rejected_before_signature_checks() {
    let auth = Authenticator::new(USER_SECRET.to_vec(), DEVICE_SECRET.to_vec());
    let body = b"irrelevant".to_vec();
    let headers = signed_headers(USER_SIGN_HEADER, &body, USER_SECRET);

    let err = auth.authorize(&headers, "not-a-token!!..x", &body).unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}

#[test]
fn unsigned_request_is_rejected() {
    let key = master_key();
    let auth = Authenticator::new(USER_SECRET.to_vec(), DEVICE_SECRET.to_vec());
    let body = encrypted_body(&key, 2);

    let err = auth.authorize(&HeaderMap::new(), &token_param(), &body).unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}

#[test]
fn signature_by_the_wrong_secret_is_rejected() {
    let key = master_key();
    let auth = Authenticator::new(USER_SECRET.to_vec(), DEVICE_SECRET.to_vec());
    let body = encrypted_body(&key, 3);
    // User header signed with the device secret.
    let headers = signed_headers(USER_SIGN_HEADER, &body, DEVICE_SECRET);

    assert!(auth.authorize(&headers, &token_param(), &body).is_err());
}

#[test]
fn wrong_master_key_rejects_at_decryption_with_the_same_error() {
    let key = master_key();
    let auth = Authenticator::new(USER_SECRET.to_vec(), DEVICE_SECRET.to_vec());
    let body = encrypted_body(&key, 4);
    let headers = signed_headers(USER_SIGN_HEADER, &body, USER_SECRET);

    let req = auth.authorize(&headers, &token_param(), &body).unwrap();
    let other = MasterKey::from_bytes(&[0x55u8; 64]).unwrap();
    let err = req.open_envelope(&other).unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}
