//! Signed, stateless form tokens.
//!
//! A token is `{expires_unix}.{nonce}.{signature}` where the signature is an
//! HMAC-SHA256 over `{expires_unix}.{nonce}` keyed with the process secret.

use crate::blog::{get_random_hex_string, FORM_TOKEN_TTL, NONCE_BYTES};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub fn issue(secret: &str) -> String {
    issue_at(secret, chrono::Utc::now().timestamp())
}

pub fn verify(secret: &str, token: &str) -> bool {
    verify_at(secret, token, chrono::Utc::now().timestamp())
}

fn issue_at(secret: &str, now: i64) -> String {
    let expires = now + FORM_TOKEN_TTL.as_secs() as i64;
    let nonce = get_random_hex_string::<NONCE_BYTES>();
    let payload = format!("{expires}.{nonce}");
    let signature = hex::encode(mac(secret, &payload).finalize().into_bytes());

    format!("{payload}.{signature}")
}

fn verify_at(secret: &str, token: &str, now: i64) -> bool {
    let Some((payload, signature)) = token.rsplit_once('.') else {
        return false;
    };
    let Some(expires) = payload
        .split_once('.')
        .and_then(|(expires, _nonce)| expires.parse::<i64>().ok())
    else {
        return false;
    };
    if now > expires {
        return false;
    }
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };

    mac(secret, payload).verify_slice(&signature).is_ok()
}

fn mac(secret: &str, payload: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("hmac should accept keys of any length");
    mac.update(payload.as_bytes());
    mac
}
