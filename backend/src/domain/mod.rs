//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc. Transport concerns (JSON shapes, OpenAPI schemas) live in
//! the inbound adapters.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Category / MenuItem: the menu catalogue.
//! - Booking: a table reservation owned by a user.
//! - User: registered account identity.
//! - Services implementing the driving ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod error;
pub mod menu;
pub mod menu_service;
pub mod ports;
pub mod price;
pub(crate) mod slug;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthToken, LoginCredentials, LoginValidationError, PASSWORD_HASH_ITERATIONS, PASSWORD_MIN,
    PasswordHash, Registration, RegistrationValidationError, TokenDigest,
};
pub use self::booking::{
    Booking, BookingDraft, BookingId, BookingPatch, BookingValidationError, GUEST_NAME_MAX,
    GUESTS_MAX, GuestCount, GuestName, TableNumber,
};
pub use self::booking_service::BookingLedgerService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::menu::{
    Category, CategoryId, CategoryTitle, Inventory, MenuItem, MenuItemDraft, MenuItemId,
    MenuItemPatch, MenuItemTitle, MenuValidationError, TITLE_MAX,
};
pub use self::menu_service::MenuCatalogService;
pub use self::price::{MAX_PRICE_CENTS, Price, PriceValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{EMAIL_MAX, Email, USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use little_lemon::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
