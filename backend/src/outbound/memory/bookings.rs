//! In-memory booking store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingId, UserId};

#[derive(Default)]
struct BookingState {
    rows: BTreeMap<BookingId, Booking>,
    last_id: i64,
}

impl BookingState {
    fn owned(&self, owner: &UserId, id: BookingId) -> Option<&Booking> {
        self.rows.get(&id).filter(|booking| booking.owner() == owner)
    }
}

/// Bookings kept in process memory.
#[derive(Default)]
pub struct InMemoryBookings {
    state: Mutex<BookingState>,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let state = lock(&self.state).map_err(BookingRepositoryError::query)?;
        Ok(state
            .rows
            .values()
            .filter(|booking| booking.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let state = lock(&self.state).map_err(BookingRepositoryError::query)?;
        Ok(state.owned(owner, id).cloned())
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &BookingDraft,
    ) -> Result<Booking, BookingRepositoryError> {
        let mut state = lock(&self.state).map_err(BookingRepositoryError::query)?;
        let id = BookingId::new(state.last_id + 1)
            .map_err(|err| BookingRepositoryError::query(err.to_string()))?;
        state.last_id = id.get();
        let booking = Booking::new(id, owner.clone(), draft.clone());
        state.rows.insert(id, booking.clone());
        Ok(booking)
    }

    async fn update_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
        draft: &BookingDraft,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut state = lock(&self.state).map_err(BookingRepositoryError::query)?;
        if state.owned(owner, id).is_none() {
            return Ok(None);
        }
        let booking = Booking::new(id, owner.clone(), draft.clone());
        state.rows.insert(id, booking.clone());
        Ok(Some(booking))
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
    ) -> Result<bool, BookingRepositoryError> {
        let mut state = lock(&self.state).map_err(BookingRepositoryError::query)?;
        if state.owned(owner, id).is_none() {
            return Ok(false);
        }
        Ok(state.rows.remove(&id).is_some())
    }
}
