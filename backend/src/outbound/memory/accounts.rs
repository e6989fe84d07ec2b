//! In-memory user and auth token store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::ports::{
    AuthTokenRepository, AuthTokenRepositoryError, StoredUser, UserPersistenceError,
    UserRepository,
};
use crate::domain::{TokenDigest, User, UserId, Username};

#[derive(Default)]
struct AccountState {
    users: Vec<StoredUser>,
    tokens: HashMap<TokenDigest, UserId>,
}

/// Users and issued tokens kept in process memory.
///
/// Implements [`UserRepository`] and [`AuthTokenRepository`].
#[derive(Default)]
pub struct InMemoryAccounts {
    state: Mutex<AccountState>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryAccounts {
    async fn insert(&self, user: &StoredUser) -> Result<(), UserPersistenceError> {
        let mut state = lock(&self.state).map_err(UserPersistenceError::query)?;
        let username = user.user.username();
        if state
            .users
            .iter()
            .any(|existing| existing.user.username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_str()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let state = lock(&self.state).map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|stored| stored.user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = lock(&self.state).map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl AuthTokenRepository for InMemoryAccounts {
    async fn replace(
        &self,
        digest: &TokenDigest,
        user: &UserId,
    ) -> Result<(), AuthTokenRepositoryError> {
        let mut state = lock(&self.state).map_err(AuthTokenRepositoryError::query)?;
        state.tokens.retain(|_, owner| owner != user);
        state.tokens.insert(digest.clone(), user.clone());
        Ok(())
    }

    async fn find_user(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, AuthTokenRepositoryError> {
        let state = lock(&self.state).map_err(AuthTokenRepositoryError::query)?;
        Ok(state.tokens.get(digest).cloned())
    }

    async fn delete(&self, digest: &TokenDigest) -> Result<bool, AuthTokenRepositoryError> {
        let mut state = lock(&self.state).map_err(AuthTokenRepositoryError::query)?;
        Ok(state.tokens.remove(digest).is_some())
    }
}
