use async_trait::async_trait;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;

/// Port for the authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user entity (callers must not expose the hash)
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed; fatal for the request
    /// * `StoreError` - Store operation failed
    async fn sign_up(&self, command: SignupCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue a signed session token.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password from the login request
    ///
    /// # Returns
    /// Self-contained token string
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or password mismatch; the two
    ///   cases are deliberately indistinguishable
    /// * `Signing` - Token signing failed; fatal for the request
    /// * `StoreError` - Store operation failed
    async fn log_in(&self, credentials: Credentials) -> Result<String, AuthError>;

    /// Validate a presented token and extract its claims.
    ///
    /// Pure over the injected secret; no store access.
    ///
    /// # Arguments
    /// * `token` - Bearer token string as presented by the client
    ///
    /// # Errors
    /// * `ExpiredToken` - Signature valid but past expiry
    /// * `InvalidToken` - Malformed structure or signature mismatch
    fn authorize(&self, token: &str) -> Result<auth::Claims, AuthError>;
}

/// Persistence operations for the user aggregate.
///
/// The only shared mutable resource in the service. Implementations must make
/// the duplicate-email check and the insert atomic: concurrent signups racing
/// on one email resolve to exactly one success.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user, assigning its id.
    ///
    /// # Arguments
    /// * `new_user` - Username, email, and password hash to store
    ///
    /// # Returns
    /// Created user entity with store-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StoreError` - Store operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string, matched exactly as stored
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}
