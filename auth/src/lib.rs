//! Authentication infrastructure library
//!
//! Provides the credential and token primitives for the service:
//! - Password hashing (Argon2id) with tunable cost parameters
//! - Signed session token issuance and verification (HS256 JWT)
//!
//! The library holds no storage or HTTP concerns; the service composes these
//! primitives behind its own ports. The signing secret is injected at
//! construction so it can be rotated, mocked in tests, and scoped per
//! deployment.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::hours(1)).unwrap();
//! let verifier = TokenVerifier::new(secret).unwrap();
//!
//! let token = issuer.issue(1, "alice@example.com").unwrap();
//! let claims = verifier.verify(&token).unwrap();
//! assert_eq!(claims.sub, 1);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenVerifier;
