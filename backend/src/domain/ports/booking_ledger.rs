//! Driving ports for the booking ledger.
//!
//! Every operation takes the authenticated owner. Bookings belonging to
//! other users are indistinguishable from missing ones.

use async_trait::async_trait;

use crate::domain::{Booking, BookingDraft, BookingId, BookingPatch, Error, UserId};

/// Booking mutations scoped to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    async fn create_booking(&self, owner: &UserId, draft: BookingDraft) -> Result<Booking, Error>;

    async fn replace_booking(
        &self,
        owner: &UserId,
        id: BookingId,
        draft: BookingDraft,
    ) -> Result<Booking, Error>;

    async fn patch_booking(
        &self,
        owner: &UserId,
        id: BookingId,
        patch: BookingPatch,
    ) -> Result<Booking, Error>;

    async fn delete_booking(&self, owner: &UserId, id: BookingId) -> Result<(), Error>;
}

/// Booking reads scoped to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    async fn list_bookings(&self, owner: &UserId) -> Result<Vec<Booking>, Error>;

    async fn get_booking(&self, owner: &UserId, id: BookingId) -> Result<Booking, Error>;
}
