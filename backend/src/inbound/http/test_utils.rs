//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, web};

use crate::Trace;
use crate::domain::{
    AccountService, BookingLedgerService, LoginCredentials, MenuCatalogService, Registration,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryAccounts, InMemoryBookings, InMemoryCatalogue};

/// Password used by [`issue_token`] accounts.
pub const TEST_PASSWORD: &str = "lemon-drizzle";

/// Handler state over fresh in-memory adapters.
///
/// Password hashing runs a couple of rounds only so tests stay fast.
pub fn memory_state() -> HttpState {
    let catalogue = Arc::new(InMemoryCatalogue::new());
    let menu = Arc::new(MenuCatalogService::new(catalogue.clone(), catalogue));
    let account_store = Arc::new(InMemoryAccounts::new());
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

/// Register `username` and return a fresh plaintext token for it.
pub async fn issue_token(state: &HttpState, username: &str) -> String {
    let registration =
        Registration::try_from_parts(username, TEST_PASSWORD, None).expect("valid registration");
    state
        .accounts
        .register(registration)
        .await
        .expect("registration succeeds");
    let credentials =
        LoginCredentials::try_from_parts(username, TEST_PASSWORD).expect("valid credentials");
    let token = state
        .accounts
        .login(&credentials)
        .await
        .expect("login succeeds");
    token.as_str().to_owned()
}

/// Full application routing over `state`, wrapped like the server wraps it.
pub fn test_app(
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

/// `Authorization` header value for `token`.
pub fn token_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Token {token}"))
}
