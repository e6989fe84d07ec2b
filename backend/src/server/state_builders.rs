//! Builders for HTTP state ports backed by Diesel or in-memory adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use little_lemon::domain::{AccountService, BookingLedgerService, MenuCatalogService};
use little_lemon::inbound::http::state::{HttpState, HttpStatePorts};
use little_lemon::outbound::memory::{InMemoryAccounts, InMemoryBookings, InMemoryCatalogue};
use little_lemon::outbound::persistence::{
    DbPool, DieselAuthTokenRepository, DieselBookingRepository, DieselCategoryRepository,
    DieselMenuItemRepository, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    let menu = Arc::new(MenuCatalogService::new(
        Arc::new(DieselCategoryRepository::new(pool.clone())),
        Arc::new(DieselMenuItemRepository::new(pool.clone())),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselAuthTokenRepository::new(pool.clone())),
    ));
    let bookings = Arc::new(BookingLedgerService::new(Arc::new(
        DieselBookingRepository::new(pool.clone()),
    )));

    HttpStatePorts {
        accounts: accounts.clone(),
        accounts_query: accounts,
        menu: menu.clone(),
        menu_query: menu,
        bookings: bookings.clone(),
        bookings_query: bookings,
    }
}

fn memory_ports() -> HttpStatePorts {
    let catalogue = Arc::new(InMemoryCatalogue::new());
    let account_store = Arc::new(InMemoryAccounts::new());
    let menu = Arc::new(MenuCatalogService::new(catalogue.clone(), catalogue));
    let accounts = Arc::new(AccountService::new(account_store.clone(), account_store));
    let bookings = Arc::new(BookingLedgerService::new(Arc::new(InMemoryBookings::new())));

    HttpStatePorts {
        accounts: accounts.clone(),
        accounts_query: accounts,
        menu: menu.clone(),
        menu_query: menu,
        bookings: bookings.clone(),
        bookings_query: bookings,
    }
}

/// Build the shared HTTP state from the configured adapters.
///
/// Without a pool every port is served from process memory and nothing
/// survives a restart.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => {
            warn!("no database configured; state is kept in memory");
            memory_ports()
        }
    };
    web::Data::new(HttpState::new(ports))
}
