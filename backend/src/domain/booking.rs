//! Table reservations owned by a user.

use std::fmt;

use chrono::{DateTime, Utc};

use super::UserId;

/// Maximum length, in characters, of a booking guest name.
pub const GUEST_NAME_MAX: usize = 255;
/// Largest party size accepted for a single booking.
pub const GUESTS_MAX: i32 = 999;

/// Validation errors raised by booking constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("table_number must be at least 1")]
    InvalidTableNumber,
    #[error("no_of_guests must be between 1 and {max}")]
    InvalidGuestCount { max: i32 },
    #[error("identifier must be positive")]
    InvalidId,
}

/// Store-assigned booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingId(i64);

impl BookingId {
    pub fn new(raw: i64) -> Result<Self, BookingValidationError> {
        if raw <= 0 {
            return Err(BookingValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name the reservation is held under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestName(String);

impl GuestName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BookingValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BookingValidationError::EmptyName);
        }
        if trimmed.chars().count() > GUEST_NAME_MAX {
            return Err(BookingValidationError::NameTooLong {
                max: GUEST_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Restaurant table number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TableNumber(i32);

impl TableNumber {
    pub fn new(raw: i64) -> Result<Self, BookingValidationError> {
        i32::try_from(raw)
            .ok()
            .filter(|value| *value >= 1)
            .map(Self)
            .ok_or(BookingValidationError::InvalidTableNumber)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Party size for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GuestCount(i32);

impl GuestCount {
    pub fn new(raw: i64) -> Result<Self, BookingValidationError> {
        i32::try_from(raw)
            .ok()
            .filter(|value| (1..=GUESTS_MAX).contains(value))
            .map(Self)
            .ok_or(BookingValidationError::InvalidGuestCount { max: GUESTS_MAX })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Client-editable booking fields used for creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub name: GuestName,
    pub table_number: TableNumber,
    pub no_of_guests: GuestCount,
    pub booking_date: DateTime<Utc>,
}

/// Partial booking update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub name: Option<GuestName>,
    pub table_number: Option<TableNumber>,
    pub no_of_guests: Option<GuestCount>,
    pub booking_date: Option<DateTime<Utc>>,
}

impl BookingPatch {
    /// Overlay the patch onto an existing booking.
    pub fn apply_to(self, booking: &Booking) -> BookingDraft {
        BookingDraft {
            name: self.name.unwrap_or_else(|| booking.name.clone()),
            table_number: self.table_number.unwrap_or(booking.table_number),
            no_of_guests: self.no_of_guests.unwrap_or(booking.no_of_guests),
            booking_date: self.booking_date.unwrap_or(booking.booking_date),
        }
    }
}

/// Reservation of a table for a party at a given time.
///
/// ## Invariants
/// - `owner` is the authenticated user that created the booking and never
///   changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    owner: UserId,
    name: GuestName,
    table_number: TableNumber,
    no_of_guests: GuestCount,
    booking_date: DateTime<Utc>,
}

impl Booking {
    pub fn new(id: BookingId, owner: UserId, draft: BookingDraft) -> Self {
        let BookingDraft {
            name,
            table_number,
            no_of_guests,
            booking_date,
        } = draft;
        Self {
            id,
            owner,
            name,
            table_number,
            no_of_guests,
            booking_date,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn name(&self) -> &GuestName {
        &self.name
    }

    pub fn table_number(&self) -> TableNumber {
        self.table_number
    }

    pub fn no_of_guests(&self) -> GuestCount {
        self.no_of_guests
    }

    pub fn booking_date(&self) -> DateTime<Utc> {
        self.booking_date
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}
