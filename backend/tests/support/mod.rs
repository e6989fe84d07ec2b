//! Shared helpers for HTTP integration suites.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, web};
use little_lemon::Trace;
use little_lemon::domain::{AccountService, BookingLedgerService, MenuCatalogService};
use little_lemon::inbound::http::configure;
use little_lemon::inbound::http::state::{HttpState, HttpStatePorts};
use little_lemon::outbound::memory::{InMemoryAccounts, InMemoryBookings, InMemoryCatalogue};

/// Password shared by every account the suites register.
pub const PASSWORD: &str = "lemon-drizzle";

/// Handler state over fresh in-memory adapters with cheap password hashing.
pub fn memory_state() -> HttpState {
    let catalogue = Arc::new(InMemoryCatalogue::new());
    let account_store = Arc::new(InMemoryAccounts::new());
    let menu = Arc::new(MenuCatalogService::new(catalogue.clone(), catalogue));
    let accounts =
        Arc::new(AccountService::new(account_store.clone(), account_store).with_hash_iterations(2));
    let bookings = Arc::new(BookingLedgerService::new(Arc::new(InMemoryBookings::new())));

    HttpState::new(HttpStatePorts {
        accounts: accounts.clone(),
        accounts_query: accounts,
        menu: menu.clone(),
        menu_query: menu,
        bookings: bookings.clone(),
        bookings_query: bookings,
    })
}

/// Application wired the way the server binary wires it, minus health probes.
pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .configure(configure)
}

/// `Authorization` header carrying `token`.
pub fn token_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Token {token}"))
}
