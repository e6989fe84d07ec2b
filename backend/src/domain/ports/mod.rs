//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters.
//! Driven ports (`*Repository`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts;
mod auth_token_repository;
mod booking_ledger;
mod booking_repository;
mod category_repository;
mod menu_catalog;
mod menu_item_repository;
mod user_repository;

#[cfg(test)]
pub use accounts::{MockAccountCommand, MockAccountQuery};
pub use accounts::{AccountCommand, AccountQuery};
#[cfg(test)]
pub use auth_token_repository::MockAuthTokenRepository;
pub use auth_token_repository::{AuthTokenRepository, AuthTokenRepositoryError};
#[cfg(test)]
pub use booking_ledger::{MockBookingCommand, MockBookingQuery};
pub use booking_ledger::{BookingCommand, BookingQuery};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use menu_catalog::{MockMenuCommand, MockMenuQuery};
pub use menu_catalog::{MenuCommand, MenuQuery};
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
pub use menu_item_repository::{MenuItemRepository, MenuItemRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredUser, UserPersistenceError, UserRepository};
