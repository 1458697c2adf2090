//! Credential primitives: signed access tokens, password digests and
//! refresh token generation.

pub mod jwt;
pub mod password;
pub mod refresh_token;

pub use jwt::{AccessClaims, TOKEN_ISSUER, TokenIssuer};
pub use password::{PasswordError, hash_password, verify_password};
pub use refresh_token::{RefreshTokenSigner, generate_refresh_token};
