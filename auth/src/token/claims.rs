use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity facts embedded in a session token.
///
/// The token is the only session state the system produces; everything needed
/// to authorize a later request is carried here and covered by the signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: numeric user identifier
    pub sub: u64,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), `iat` + lifetime
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject at an explicit point in time.
    ///
    /// # Arguments
    /// * `subject` - User identifier stored in `sub`
    /// * `email` - Subject's email address
    /// * `issued_at` - Issuance instant; `exp` is derived from it
    /// * `lifetime` - How long the token stays valid
    pub fn new(
        subject: u64,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: subject,
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_derived_from_lifetime() {
        let now = Utc::now();
        let claims = Claims::new(7, "alice@example.com", now, Duration::hours(1));

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_negative_lifetime_expires_in_the_past() {
        let now = Utc::now();
        let claims = Claims::new(7, "alice@example.com", now, Duration::seconds(-30));

        assert!(claims.exp < claims.iat);
    }
}
