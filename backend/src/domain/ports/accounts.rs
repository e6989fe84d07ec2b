//! Driving ports for registration, token login and caller identity.
//!
//! Inbound adapters call these ports to authenticate requests without
//! importing persistence concerns, which keeps handler tests deterministic.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials, Registration, User};

/// Account mutations: sign-up and token issuance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new user.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Validate credentials and issue a new auth token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;

    /// Revoke the presented token.
    async fn logout(&self, token: &AuthToken) -> Result<(), Error>;
}

/// Identity lookups for authenticated requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Resolve the user a token belongs to, or fail with `unauthorized`.
    async fn authenticate(&self, token: &AuthToken) -> Result<User, Error>;

    /// Users visible to the caller. Only the caller is visible.
    async fn list_users(&self, caller: &User) -> Result<Vec<User>, Error>;
}
