//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! Every statement filters on `owner_id` so ownership is enforced by the same
//! query that reads or writes the row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingId, GuestCount, GuestName, TableNumber, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BookingRow, BookingUpdate, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let BookingRow {
        id,
        owner_id,
        name,
        table_number,
        no_of_guests,
        booking_date,
    } = row;
    let corrupt = |err: crate::domain::BookingValidationError| {
        BookingRepositoryError::query(format!("corrupt booking row: {err}"))
    };

    let draft = BookingDraft {
        name: GuestName::new(name).map_err(corrupt)?,
        table_number: TableNumber::new(i64::from(table_number)).map_err(corrupt)?,
        no_of_guests: GuestCount::new(i64::from(no_of_guests)).map_err(corrupt)?,
        booking_date,
    };
    let id = BookingId::new(id).map_err(corrupt)?;
    Ok(Booking::new(id, UserId::from_uuid(owner_id), draft))
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::owner_id.eq(owner.as_uuid()))
            .order(bookings::id.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_booking).collect()
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = bookings::table
            .filter(bookings::owner_id.eq(owner.as_uuid()))
            .filter(bookings::id.eq(id.get()))
            .select(BookingRow::as_select())
            .first::<BookingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_booking).transpose()
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &BookingDraft,
    ) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBookingRow {
            owner_id: *owner.as_uuid(),
            name: draft.name.as_str(),
            table_number: draft.table_number.get(),
            no_of_guests: draft.no_of_guests.get(),
            booking_date: draft.booking_date,
        };
        let row = diesel::insert_into(bookings::table)
            .values(&new_row)
            .returning(BookingRow::as_returning())
            .get_result::<BookingRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_booking(row)
    }

    async fn update_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
        draft: &BookingDraft,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = BookingUpdate {
            name: draft.name.as_str(),
            table_number: draft.table_number.get(),
            no_of_guests: draft.no_of_guests.get(),
            booking_date: draft.booking_date,
        };
        let row = diesel::update(
            bookings::table
                .filter(bookings::owner_id.eq(owner.as_uuid()))
                .filter(bookings::id.eq(id.get())),
        )
        .set(&changes)
        .returning(BookingRow::as_returning())
        .get_result::<BookingRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_booking).transpose()
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        id: BookingId,
    ) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            bookings::table
                .filter(bookings::owner_id.eq(owner.as_uuid()))
                .filter(bookings::id.eq(id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
