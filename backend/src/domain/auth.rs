//! Authentication primitives: credentials, password hashes and auth tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Secrets are wrapped in [`Zeroizing`] so they are wiped on drop.

use std::fmt;

use pbkdf2::pbkdf2_hmac_array;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::{Email, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use little_lemon::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 8;

/// Validation errors raised while building a [`Registration`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("{0}")]
    User(#[from] UserValidationError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: Option<Email>,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let email = email
            .filter(|raw| !raw.trim().is_empty())
            .map(Email::new)
            .transpose()?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

const HASH_SCHEME: &str = "pbkdf2_sha256";
/// PBKDF2-HMAC-SHA256 rounds applied when hashing new passwords.
pub const PASSWORD_HASH_ITERATIONS: u32 = 600_000;
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

fn stretch(password: &str, salt: &[u8], iterations: u32) -> [u8; DIGEST_LEN] {
    pbkdf2_hmac_array::<Sha256, DIGEST_LEN>(password.as_bytes(), salt, iterations)
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

struct DecodedHash {
    iterations: u32,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

/// Encoded password hash: `pbkdf2_sha256$<iterations>$<salt hex>$<digest hex>`.
///
/// Deriving and verifying cost a full PBKDF2 run, so async callers should
/// move both onto a blocking thread.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn derive(password: &str) -> Self {
        Self::derive_with(password, PASSWORD_HASH_ITERATIONS)
    }

    /// Hash `password` with a fresh random salt and explicit round count.
    pub fn derive_with(password: &str, iterations: u32) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let iterations = iterations.max(1);
        let digest = stretch(password, &salt, iterations);
        Self::encode(iterations, &salt, &digest)
    }

    /// Well-formed hash that no password verifies against.
    ///
    /// Checking a password against it costs the same as a real hash with
    /// `iterations` rounds, which keeps unknown usernames indistinguishable
    /// from wrong passwords.
    pub fn placeholder(iterations: u32) -> Self {
        Self::encode(iterations.max(1), &[0_u8; SALT_LEN], &[0_u8; DIGEST_LEN])
    }

    fn encode(iterations: u32, salt: &[u8], digest: &[u8]) -> Self {
        Self(format!(
            "{HASH_SCHEME}${iterations}${}${}",
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    fn decode(&self) -> Option<DecodedHash> {
        let mut parts = self.0.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(digest), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return None;
        };
        if scheme != HASH_SCHEME {
            return None;
        }
        let iterations = iterations.parse::<u32>().ok().filter(|n| *n > 0)?;
        Some(DecodedHash {
            iterations,
            salt: hex::decode(salt).ok()?,
            digest: hex::decode(digest).ok()?,
        })
    }

    /// Wrap an encoded hash read back from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded form suitable for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Round count recorded in the encoding, if it is well formed.
    pub fn iterations(&self) -> Option<u32> {
        self.decode().map(|decoded| decoded.iterations)
    }

    /// Check `password` against the hash in constant time.
    ///
    /// Malformed encodings never verify.
    pub fn verify(&self, password: &str) -> bool {
        let Some(decoded) = self.decode() else {
            return false;
        };
        let actual = stretch(password, &decoded.salt, decoded.iterations);
        let matches = constant_time_eq(&actual, &decoded.digest);
        matches && decoded.digest.iter().any(|byte| *byte != 0)
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

const TOKEN_BYTES: usize = 20;

/// Opaque bearer token handed to clients after login.
///
/// The plaintext is 40 lowercase hex characters; only its [`TokenDigest`]
/// is persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        OsRng.fill_bytes(&mut *bytes);
        Self(Zeroizing::new(hex::encode(&*bytes)))
    }

    /// Parse a token presented by a client.
    ///
    /// Returns `None` unless the value is exactly 40 hex characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        (raw.len() == TOKEN_BYTES * 2 && raw.chars().all(|ch| ch.is_ascii_hexdigit()))
            .then(|| Self(Zeroizing::new(raw.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Digest used to look the token up in storage.
    pub fn digest(&self) -> TokenDigest {
        TokenDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Hex-encoded SHA-256 digest of an [`AuthToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Wrap a digest read back from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
