//! Process configuration loaded via OrthoConfig.
//!
//! Values come from the environment (and matching CLI flags). Unset values
//! fall back to the defaults declared on each field.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Failure assembling a connection URL from [`DatabaseSettings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatabaseUrlError {
    #[error("invalid database host or port: {0}")]
    Address(#[from] url::ParseError),
    #[error("database credentials cannot be attached to {host}")]
    Credentials { host: String },
}

/// PostgreSQL connection settings read from `DB_*` variables.
///
/// The database is optional: without `DB_NAME` the server keeps all state in
/// memory.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Database name. Enables PostgreSQL persistence when set.
    pub name: Option<String>,
    /// Server hostname.
    #[ortho_config(default = DEFAULT_DB_HOST.to_owned())]
    pub host: String,
    /// Server port.
    #[ortho_config(default = DEFAULT_DB_PORT)]
    pub port: u16,
    /// Login role.
    pub user: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// Whether a database has been configured.
    pub fn is_configured(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Build a `postgres://` connection URL, or `None` when no database is
    /// configured.
    ///
    /// The role, password and database name are percent-encoded, so values
    /// containing `@`, `/` or `#` survive intact.
    pub fn database_url(&self) -> Result<Option<String>, DatabaseUrlError> {
        let Some(name) = self.name.as_deref().filter(|_| self.is_configured()) else {
            return Ok(None);
        };

        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))?;
        let credentials = || DatabaseUrlError::Credentials {
            host: self.host.clone(),
        };
        url.path_segments_mut()
            .map_err(|()| credentials())?
            .push(name.trim());
        if let Some(user) = self.user.as_deref() {
            url.set_username(user).map_err(|()| credentials())?;
            if let Some(password) = self.password.as_deref() {
                url.set_password(Some(password))
                    .map_err(|()| credentials())?;
            }
        }
        Ok(Some(url.into()))
    }
}

/// HTTP listener settings read from `LITTLE_LEMON_*` variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LITTLE_LEMON")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8000`.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
}

impl ServerSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.parse()
    }
}
