//! Driven port for booking persistence.
//!
//! Every lookup and mutation is scoped to an owner so adapters can enforce
//! ownership inside a single query.

use async_trait::async_trait;

use crate::domain::{Booking, BookingDraft, BookingId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

/// Port for storing and reading bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Return the owner's bookings ordered by identifier.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Fetch one of the owner's bookings.
    ///
    /// Bookings owned by other users are reported as `None`.
    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Persist a new booking for `owner`.
    async fn insert(
        &self,
        owner: &UserId,
        draft: &BookingDraft,
    ) -> Result<Booking, BookingRepositoryError>;

    /// Overwrite one of the owner's bookings. Returns `None` when absent.
    async fn update_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
        draft: &BookingDraft,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Remove one of the owner's bookings. Returns `false` when absent.
    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
    ) -> Result<bool, BookingRepositoryError>;
}
