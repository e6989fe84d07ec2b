//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; row structs (`models.rs`) and table definitions (`schema.rs`) never
//! leave this module. Connections come from a `bb8` pool through
//! `diesel-async`, and every database failure is mapped into the owning
//! port's error enum.
//!
//! # Example
//!
//! ```no_run
//! use little_lemon::outbound::persistence::{DbPool, DieselMenuItemRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), little_lemon::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/littlelemon")).await?;
//! let _menu = DieselMenuItemRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_auth_token_repository;
mod diesel_basic_error_mapping;
mod diesel_booking_repository;
mod diesel_category_repository;
mod diesel_menu_item_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_auth_token_repository::DieselAuthTokenRepository;
pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_menu_item_repository::DieselMenuItemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
