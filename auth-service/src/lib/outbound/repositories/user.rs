use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;
use crate::user::errors::AuthError;

/// In-memory user store.
///
/// Reference backend behind the `UserStore` port; a persistent store can be
/// substituted without touching token or hashing logic. The duplicate-email
/// check and the insert share one write lock, so the email-uniqueness
/// invariant holds under concurrent signups.
pub struct InMemoryUserStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    users: Vec<User>,
    next_id: u64,
}

impl InMemoryUserStore {
    /// Create an empty store. Ids are assigned monotonically from 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AuthError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| AuthError::StoreError("user store lock poisoned".to_string()))?;

        if inner
            .users
            .iter()
            .any(|user| user.email.as_str() == new_user.email.as_str())
        {
            return Err(AuthError::EmailAlreadyExists(
                new_user.email.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId(inner.next_id),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| AuthError::StoreError("user store lock poisoned".to_string()))?;

        // Exact match, case-sensitive as received
        Ok(inner
            .users
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_from_one() {
        let store = InMemoryUserStore::new();

        let first = store.create(new_user("alice", "alice@example.com")).await.unwrap();
        let second = store.create(new_user("bob", "bob@example.com")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();

        store.create(new_user("alice", "a@x.com")).await.unwrap();
        let result = store.create(new_user("alice2", "a@x.com")).await;

        assert!(matches!(
            result.unwrap_err(),
            AuthError::EmailAlreadyExists(_)
        ));

        // Exactly one record survives
        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_sensitive() {
        let store = InMemoryUserStore::new();

        store.create(new_user("alice", "Alice@example.com")).await.unwrap();

        assert!(store.find_by_email("Alice@example.com").await.unwrap().is_some());
        assert!(store.find_by_email("alice@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let store = InMemoryUserStore::new();
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_one_success() {
        let store = Arc::new(InMemoryUserStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create(new_user(&format!("user{}", i), "race@example.com"))
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
    }
}
