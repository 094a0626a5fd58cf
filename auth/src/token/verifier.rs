use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Validates session tokens and extracts their claims.
///
/// Exactly three outcomes: malformed structure or signature mismatch
/// (`Invalid`), signature-valid but past expiry (`Expired`), or the decoded
/// claims. Callers surface the two failures as one uniform denial; the
/// distinction exists for operator diagnostics only.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a token verifier.
    ///
    /// # Arguments
    /// * `secret` - Signing secret; must match the issuer's
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced to the second; the default 60s leeway would keep
        // freshly expired tokens alive
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Decode a token, check its signature, and enforce expiry.
    ///
    /// Signature comparison happens inside the JWT library in constant time.
    ///
    /// # Arguments
    /// * `token` - Compact token string as presented by the client
    ///
    /// # Returns
    /// The embedded claims
    ///
    /// # Errors
    /// * `Expired` - Signature valid but `exp` is in the past
    /// * `Invalid` - Anything else: malformed structure, bad signature,
    ///   missing claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::token::issuer::TokenIssuer;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn issuer(lifetime: Duration) -> TokenIssuer {
        TokenIssuer::new(SECRET, lifetime).expect("Failed to build issuer")
    }

    #[test]
    fn test_roundtrip_returns_original_claims() {
        let verifier = TokenVerifier::new(SECRET).expect("Failed to build verifier");

        let now = Utc::now();
        let claims = Claims::new(42, "alice@example.com", now, Duration::hours(1));
        let token = issuer(Duration::hours(1))
            .issue_claims(&claims)
            .expect("Failed to issue");

        let decoded = verifier.verify(&token).expect("Failed to verify");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_garbage_is_invalid() {
        let verifier = TokenVerifier::new(SECRET).expect("Failed to build verifier");

        let result = verifier.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let verifier = TokenVerifier::new(b"a_different_secret_32_bytes_long!!")
            .expect("Failed to build verifier");

        let token = issuer(Duration::hours(1))
            .issue(42, "alice@example.com")
            .expect("Failed to issue");

        let result = verifier.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let verifier = TokenVerifier::new(SECRET).expect("Failed to build verifier");

        let token = issuer(Duration::hours(1))
            .issue(42, "alice@example.com")
            .expect("Failed to issue");

        // Flip one byte of the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        let result = verifier.verify(&tampered);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_past_expiry_is_expired_not_invalid() {
        let verifier = TokenVerifier::new(SECRET).expect("Failed to build verifier");

        // Issued two hours ago with a one hour lifetime
        let issued_at = Utc::now() - Duration::hours(2);
        let claims = Claims::new(42, "alice@example.com", issued_at, Duration::hours(1));
        let token = issuer(Duration::hours(1))
            .issue_claims(&claims)
            .expect("Failed to issue");

        let result = verifier.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_missing_exp_is_invalid() {
        use serde::Serialize;

        #[derive(Serialize)]
        struct NoExpiry {
            sub: u64,
            email: String,
            iat: i64,
        }

        let header = jsonwebtoken::Header::new(Algorithm::HS256);
        let key = jsonwebtoken::EncodingKey::from_secret(SECRET);
        let token = jsonwebtoken::encode(
            &header,
            &NoExpiry {
                sub: 42,
                email: "alice@example.com".to_string(),
                iat: Utc::now().timestamp(),
            },
            &key,
        )
        .expect("Failed to encode");

        let verifier = TokenVerifier::new(SECRET).expect("Failed to build verifier");
        let result = verifier.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = TokenVerifier::new(b"");
        assert!(matches!(result, Err(TokenError::EmptySecret)));
    }
}
