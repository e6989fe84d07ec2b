//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::ffi::OsString;
use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use little_lemon::inbound::http::health::HealthState;
use little_lemon::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use little_lemon::settings::{DatabaseSettings, ServerSettings};
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

const APP_NAME: &str = "little-lemon";
const POOL_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Apply migrations and open the connection pool for `settings`.
async fn connect_database(url: String, settings: &DatabaseSettings) -> Result<DbPool> {
    let migration_url = url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;

    let config = PoolConfig::new(url)
        .with_max_size(settings.max_connections())
        .with_connection_timeout(POOL_CONNECT_TIMEOUT);
    DbPool::new(config)
        .await
        .wrap_err("failed to build database pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = [OsString::from(APP_NAME)];
    let server_settings =
        ServerSettings::load_from_iter(args.clone()).wrap_err("failed to load server settings")?;
    let db_settings =
        DatabaseSettings::load_from_iter(args).wrap_err("failed to load database settings")?;

    let bind_addr = server_settings
        .bind_addr()
        .map_err(|e| eyre!("invalid bind address: {e}"))?;
    let mut config = ServerConfig::new(bind_addr);

    let database_url = db_settings
        .database_url()
        .wrap_err("invalid database settings")?;
    if let Some(url) = database_url {
        let pool = connect_database(url, &db_settings).await?;
        info!(
            host = db_settings.host(),
            port = db_settings.port(),
            "database ready"
        );
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, persistent = config.has_db_pool(), "starting server");
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
