use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use auth::TokenError;
use auth::TokenIssuer;
use auth::TokenVerifier;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserStore;

/// Domain service implementation for the authentication flows.
///
/// Orchestrates the store, the password hasher, and the token issuer/verifier.
/// The signing secret lives inside the injected issuer and verifier and is
/// never read back out.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    password_hasher: Arc<PasswordHasher>,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the deployment's cost
    ///   parameters
    /// * `token_issuer` - Issuer holding the signing secret and lifetime
    /// * `token_verifier` - Verifier holding the same secret
    pub fn new(
        store: Arc<S>,
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        token_verifier: TokenVerifier,
    ) -> Self {
        Self {
            store,
            password_hasher: Arc::new(password_hasher),
            token_issuer,
            token_verifier,
        }
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: UserStore,
{
    async fn sign_up(&self, command: SignupCommand) -> Result<User, AuthError> {
        if self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        // Argon2 is CPU-bound; run it off the async scheduler
        let hasher = Arc::clone(&self.password_hasher);
        let password = command.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Unknown(format!("Hashing task failed: {}", e)))??;

        // The store re-checks uniqueness under its own lock; racing signups
        // with one email resolve to a single success there
        let user = self
            .store
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(user)
    }

    async fn log_in(&self, credentials: Credentials) -> Result<String, AuthError> {
        let user = match self.store.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => {
                // Same rejection as a password mismatch; only the log differs
                tracing::debug!("login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let hasher = Arc::clone(&self.password_hasher);
        let password = credentials.password;
        let stored_hash = user.password_hash.clone();
        let password_matches =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
                .await
                .map_err(|e| AuthError::Unknown(format!("Verification task failed: {}", e)))?;

        if !password_matches {
            tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .token_issuer
            .issue(user.id.0, user.email.as_str())
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        tracing::info!(user_id = %user.id, "session token issued");

        Ok(token)
    }

    fn authorize(&self, token: &str) -> Result<Claims, AuthError> {
        self.token_verifier.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}
