//! Opaque refresh tokens.
//!
//! Clients receive 32 random bytes as hex. The database only ever sees the
//! HMAC-SHA256 of the token keyed by the server secret, so a leaked table
//! cannot be replayed without that secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_BYTES: usize = 32;

/// Generates a new refresh token (64 lowercase hex characters).
pub fn generate_refresh_token() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(hex::encode(buffer))
}

/// Digests refresh tokens for storage and lookup.
#[derive(Clone)]
pub struct RefreshTokenSigner {
    secret: Vec<u8>,
}

impl RefreshTokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    /// Returns a 64-character lowercase hex-encoded MAC of `token`.
    pub fn digest(&self, token: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
