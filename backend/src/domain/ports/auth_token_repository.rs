//! Driven port for auth token persistence.
//!
//! Adapters only ever see token digests, never plaintext tokens. Each user
//! holds at most one live token.

use async_trait::async_trait;

use crate::domain::{TokenDigest, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by auth token adapters.
    pub enum AuthTokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "auth token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "auth token repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Record a freshly issued token for `user`, revoking any token the user
    /// held before.
    async fn replace(
        &self,
        digest: &TokenDigest,
        user: &UserId,
    ) -> Result<(), AuthTokenRepositoryError>;

    /// Resolve the user a token was issued to.
    async fn find_user(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<UserId>, AuthTokenRepositoryError>;

    /// Revoke a token. Returns `false` when it was unknown.
    async fn delete(&self, digest: &TokenDigest) -> Result<bool, AuthTokenRepositoryError>;
}
