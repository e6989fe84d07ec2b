//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes are registered without a trailing slash; the application wraps
//! them in `NormalizePath::trim()` so `/restaurant/menu/` and
//! `/restaurant/menu` reach the same handler.

pub mod accounts;
pub mod auth;
pub mod bookings;
pub mod categories;
pub mod error;
pub mod health;
pub mod menu;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every API route plus the shared extractor configuration.
///
/// Expects [`state::HttpState`] in application data. Health probes are
/// registered separately because they depend on [`health::HealthState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    validation::extractor_config(cfg);
    cfg.service(accounts::register)
        .service(accounts::list_users)
        .service(accounts::current_user)
        .service(accounts::login)
        .service(accounts::logout)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::get_category)
        .service(categories::delete_category)
        .service(menu::list_menu_items)
        .service(menu::create_menu_item)
        .service(menu::get_menu_item)
        .service(menu::replace_menu_item)
        .service(menu::patch_menu_item)
        .service(menu::delete_menu_item)
        .service(bookings::list_bookings)
        .service(bookings::create_booking)
        .service(bookings::get_booking)
        .service(bookings::replace_booking)
        .service(bookings::patch_booking)
        .service(bookings::delete_booking);
}
