#![forbid(unsafe_code)]

use rand::RngCore;
use sha2::{Digest, Sha256};
use tt_core::model::Role;

/// Issued on signup. The token is the only client-held artifact; the store
/// keeps its SHA-256 digest.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub organization: Option<i64>,
}

pub(crate) fn issue_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub(crate) fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
