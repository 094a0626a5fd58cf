use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;

/// Builds and signs bounded-lifetime session tokens.
///
/// Output is a compact JWT (HS256): self-contained, transportable, carrying
/// algorithm id, claims, expiry, and signature. No server-side record of the
/// token is kept.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create a token issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing secret; should be at least 256 bits for HS256
    /// * `lifetime` - Validity window for issued tokens
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty; fatal, tokens must never be signed
    ///   with a blank key
    pub fn new(secret: &[u8], lifetime: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        })
    }

    /// Issue a signed token for a subject, valid from now for the configured
    /// lifetime.
    ///
    /// # Arguments
    /// * `subject` - User identifier placed in the `sub` claim
    /// * `email` - Subject's email address
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(&self, subject: u64, email: &str) -> Result<String, TokenError> {
        let claims = Claims::new(subject, email, Utc::now(), self.lifetime);
        self.issue_claims(&claims)
    }

    /// Sign a fully constructed claim set.
    ///
    /// Lets callers control the clock; `issue` is the common path.
    pub fn issue_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}
