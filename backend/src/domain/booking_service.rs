//! Booking ledger domain service.
//!
//! Every operation is scoped to the authenticated owner. A booking that
//! belongs to somebody else is reported exactly like a missing one so the
//! API never confirms that another user's booking exists.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingId, BookingPatch, Error, UserId};

/// Booking service implementing the booking driving ports.
#[derive(Clone)]
pub struct BookingLedgerService<B> {
    bookings: Arc<B>,
}

impl<B> BookingLedgerService<B> {
    /// Create a new service with the given repository.
    pub fn new(bookings: Arc<B>) -> Self {
        Self { bookings }
    }
}

fn booking_not_found(id: BookingId) -> Error {
    Error::not_found(format!("booking {id} not found"))
        .with_details(json!({ "id": id.get(), "code": "booking_not_found" }))
}

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

#[async_trait]
impl<B> BookingCommand for BookingLedgerService<B>
where
    B: BookingRepository,
{
    async fn create_booking(&self, owner: &UserId, draft: BookingDraft) -> Result<Booking, Error> {
        let booking = self
            .bookings
            .insert(owner, &draft)
            .await
            .map_err(map_booking_error)?;
        debug!(booking_id = %booking.id(), owner = %owner, "booking created");
        Ok(booking)
    }

    async fn replace_booking(
        &self,
        owner: &UserId,
        id: BookingId,
        draft: BookingDraft,
    ) -> Result<Booking, Error> {
        self.bookings
            .update_for_owner(owner, id, &draft)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| booking_not_found(id))
    }

    async fn patch_booking(
        &self,
        owner: &UserId,
        id: BookingId,
        patch: BookingPatch,
    ) -> Result<Booking, Error> {
        let current = self.get_booking(owner, id).await?;
        let draft = patch.apply_to(&current);
        self.replace_booking(owner, id, draft).await
    }

    async fn delete_booking(&self, owner: &UserId, id: BookingId) -> Result<(), Error> {
        let deleted = self
            .bookings
            .delete_for_owner(owner, id)
            .await
            .map_err(map_booking_error)?;
        if deleted {
            Ok(())
        } else {
            Err(booking_not_found(id))
        }
    }
}

#[async_trait]
impl<B> BookingQuery for BookingLedgerService<B>
where
    B: BookingRepository,
{
    async fn list_bookings(&self, owner: &UserId) -> Result<Vec<Booking>, Error> {
        self.bookings
            .list_for_owner(owner)
            .await
            .map_err(map_booking_error)
    }

    async fn get_booking(&self, owner: &UserId, id: BookingId) -> Result<Booking, Error> {
        self.bookings
            .find_for_owner(owner, id)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| booking_not_found(id))
    }
}
