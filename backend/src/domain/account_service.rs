//! Account domain service: registration, token login and request identity.
//!
//! Passwords are stored as salted PBKDF2 hashes and tokens are persisted by
//! digest only, so neither adapter ever sees a plaintext secret. Hashing runs
//! on Tokio's blocking pool so it never stalls an HTTP worker.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountCommand, AccountQuery, AuthTokenRepository, AuthTokenRepositoryError, StoredUser,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthToken, Error, LoginCredentials, PASSWORD_HASH_ITERATIONS, PasswordHash, Registration,
    User, UserId, Username,
};

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
    hash_iterations: u32,
}

impl<U, T> AccountService<U, T> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self {
            users,
            tokens,
            hash_iterations: PASSWORD_HASH_ITERATIONS,
        }
    }

    /// Override the password hashing round count used for new accounts.
    #[must_use]
    pub fn with_hash_iterations(mut self, iterations: u32) -> Self {
        self.hash_iterations = iterations;
        self
    }
}

/// Run CPU-bound password work off the async executor.
async fn run_blocking<F, R>(task: F) -> Result<R, Error>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))
}

/// Hash a login attempt is checked against.
///
/// Unknown users get a placeholder with the same round count so both
/// outcomes cost one full derivation.
fn verification_target(stored: Option<&StoredUser>, iterations: u32) -> PasswordHash {
    stored.map_or_else(
        || PasswordHash::placeholder(iterations),
        |found| found.password_hash.clone(),
    )
}

fn invalid_credentials() -> Error {
    Error::invalid_request("unable to log in with provided credentials")
        .with_details(json!({ "code": "invalid_credentials" }))
}

fn invalid_token() -> Error {
    Error::unauthorized("invalid or revoked token")
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::invalid_request("a user with that username already exists").with_details(
                json!({
                    "field": "username",
                    "value": username,
                    "code": "already_exists",
                }),
            )
        }
    }
}

fn map_token_error(error: AuthTokenRepositoryError) -> Error {
    match error {
        AuthTokenRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("auth token repository unavailable: {message}"))
        }
        AuthTokenRepositoryError::Query { message } => {
            Error::internal(format!("auth token repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U, T> AccountCommand for AccountService<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().cloned(),
        );
        let password = Zeroizing::new(registration.password().to_owned());
        let iterations = self.hash_iterations;
        let password_hash =
            run_blocking(move || PasswordHash::derive_with(&password, iterations)).await?;
        let stored = StoredUser {
            user,
            password_hash,
        };
        self.users.insert(&stored).await.map_err(map_user_error)?;
        info!(user_id = %stored.user.id(), "user registered");
        Ok(stored.user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        // Usernames that fail validation can never have been registered.
        let stored = match Username::new(credentials.username()) {
            Ok(username) => self
                .users
                .find_by_username(&username)
                .await
                .map_err(map_user_error)?,
            Err(_) => None,
        };
        let target = verification_target(stored.as_ref(), self.hash_iterations);
        let password = Zeroizing::new(credentials.password().to_owned());
        let verified = run_blocking(move || target.verify(&password)).await?;
        let Some(stored) = stored.filter(|_| verified) else {
            debug!("login rejected");
            return Err(invalid_credentials());
        };

        let token = AuthToken::generate();
        self.tokens
            .replace(&token.digest(), stored.user.id())
            .await
            .map_err(map_token_error)?;
        info!(user_id = %stored.user.id(), "auth token issued");
        Ok(token)
    }

    async fn logout(&self, token: &AuthToken) -> Result<(), Error> {
        let revoked = self
            .tokens
            .delete(&token.digest())
            .await
            .map_err(map_token_error)?;
        if revoked {
            Ok(())
        } else {
            Err(invalid_token())
        }
    }
}

#[async_trait]
impl<U, T> AccountQuery for AccountService<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    async fn authenticate(&self, token: &AuthToken) -> Result<User, Error> {
        let user_id = self
            .tokens
            .find_user(&token.digest())
            .await
            .map_err(map_token_error)?
            .ok_or_else(invalid_token)?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(invalid_token)
    }

    async fn list_users(&self, caller: &User) -> Result<Vec<User>, Error> {
        Ok(vec![caller.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockAuthTokenRepository, MockUserRepository};
    use rstest::rstest;
    use serde_json::Value;

    type Service = AccountService<MockUserRepository, MockAuthTokenRepository>;

    fn make_service(users: MockUserRepository, tokens: MockAuthTokenRepository) -> Service {
        AccountService::new(Arc::new(users), Arc::new(tokens)).with_hash_iterations(2)
    }

    fn stored_user(username: &str, password: &str) -> StoredUser {
        StoredUser {
            user: User::new(
                UserId::random(),
                Username::new(username).expect("valid username"),
                None,
            ),
            password_hash: PasswordHash::derive_with(password, 2),
        }
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("valid credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_a_verifiable_hash() {
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .withf(|stored| {
                stored.user.username().as_str() == "ada"
                    && stored.password_hash.verify("lemon-tart")
                    && !stored.password_hash.as_str().contains("lemon-tart")
            })
            .times(1)
            .return_once(|_| Ok(()));

        let registration =
            Registration::try_from_parts("ada", "lemon-tart", None).expect("valid registration");
        let user = make_service(users, MockAuthTokenRepository::new())
            .register(registration)
            .await
            .expect("registration succeeds");

        assert_eq!(user.username().as_str(), "ada");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate_username("ada")));

        let registration =
            Registration::try_from_parts("ada", "lemon-tart", None).expect("valid registration");
        let err = make_service(users, MockAuthTokenRepository::new())
            .register(registration)
            .await
            .expect_err("duplicate must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("username"));
    }

    #[rstest]
    #[tokio::test]
    async fn login_issues_token_and_stores_only_its_digest() {
        let stored = stored_user("ada", "lemon-tart");
        let user_id = stored.user.id().clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(move |_| Ok(Some(stored)));
        let mut tokens = MockAuthTokenRepository::new();
        tokens
            .expect_replace()
            .withf(move |digest, owner| *owner == user_id && digest.as_str().len() == 64)
            .times(1)
            .return_once(|_, _| Ok(()));

        let token = make_service(users, tokens)
            .login(&credentials("ada", "lemon-tart"))
            .await
            .expect("login succeeds");

        assert_eq!(token.as_str().len(), 40);
    }

    #[rstest]
    #[case("ada", "wrong-password")]
    #[case("ghost", "lemon-tart")]
    #[case("bad name", "lemon-tart")]
    #[tokio::test]
    async fn bad_credentials_are_invalid_requests(#[case] username: &str, #[case] password: &str) {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|candidate| {
            Ok((candidate.as_str() == "ada").then(|| stored_user("ada", "lemon-tart")))
        });
        let mut tokens = MockAuthTokenRepository::new();
        tokens.expect_replace().never();

        let err = make_service(users, tokens)
            .login(&credentials(username, password))
            .await
            .expect_err("bad credentials must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_credentials")
        );
    }

    #[rstest]
    fn unknown_users_are_checked_against_an_equally_costly_hash() {
        let target = verification_target(None, 7);
        assert_eq!(target.iterations(), Some(7));
        assert!(!target.verify("lemon-tart"));

        let stored = stored_user("ada", "lemon-tart");
        let target = verification_target(Some(&stored), 7);
        assert_eq!(target, stored.password_hash);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_tokens_are_unauthorized() {
        let mut tokens = MockAuthTokenRepository::new();
        tokens.expect_find_user().return_once(|_| Ok(None));

        let err = make_service(MockUserRepository::new(), tokens)
            .authenticate(&AuthToken::generate())
            .await
            .expect_err("unknown token must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn token_repository_outage_is_service_unavailable() {
        let mut tokens = MockAuthTokenRepository::new();
        tokens
            .expect_find_user()
            .return_once(|_| Err(AuthTokenRepositoryError::connection("refused")));

        let err = make_service(MockUserRepository::new(), tokens)
            .authenticate(&AuthToken::generate())
            .await
            .expect_err("outage must fail");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_users_reveals_only_the_caller() {
        let caller = stored_user("ada", "lemon-tart").user;
        let users = make_service(MockUserRepository::new(), MockAuthTokenRepository::new())
            .list_users(&caller)
            .await
            .expect("listing succeeds");

        assert_eq!(users, vec![caller]);
    }
}
