//! Signing parameters for backend-issued access tokens.

use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Default access-token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Built once at startup from `BACKEND_JWT_SECRET` and shared by token
/// minting and by the dispatcher's authentication stage.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    /// Access-token lifetime; minted claims carry `exp = iat + token_ttl`.
    pub token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime, e.g. for short-lived test tokens.
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}
