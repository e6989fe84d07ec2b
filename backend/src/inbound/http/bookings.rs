//! Table booking handlers.
//!
//! ```text
//! GET    /restaurant/booking/tables/
//! POST   /restaurant/booking/tables/       {"name":"John","table_number":4,"no_of_guests":2,"booking_date":"2026-07-04T19:00:00Z"}
//! GET    /restaurant/booking/tables/{id}/
//! PUT    /restaurant/booking/tables/{id}/
//! PATCH  /restaurant/booking/tables/{id}/
//! DELETE /restaurant/booking/tables/{id}/
//! ```
//!
//! Every route needs an auth token and only ever sees the caller's bookings.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Booking, BookingDraft, BookingId, BookingPatch, Error, GuestCount, GuestName, TableNumber,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, deserialize_some, invalid_field_error, missing_field_error,
    parse_optional_rfc3339_timestamp, parse_rfc3339_timestamp, reject_null,
};

const NAME: FieldName = FieldName::new("name");
const TABLE_NUMBER: FieldName = FieldName::new("table_number");
const NO_OF_GUESTS: FieldName = FieldName::new("no_of_guests");
const BOOKING_DATE: FieldName = FieldName::new("booking_date");

/// Request body for creating or replacing a booking.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BookingRequest {
    /// Guest name.
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = 4)]
    pub table_number: Option<i64>,
    #[schema(example = 2)]
    pub no_of_guests: Option<i64>,
    /// RFC 3339 timestamp.
    #[schema(example = "2026-07-04T19:00:00Z")]
    pub booking_date: Option<String>,
}

/// Request body for partial booking updates.
///
/// Absent fields are left untouched. No booking field accepts `null`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BookingPatchRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub table_number: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub no_of_guests: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub booking_date: Option<Option<String>>,
}

/// Booking as returned to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = 4)]
    pub table_number: i32,
    #[schema(example = 2)]
    pub no_of_guests: i32,
    #[schema(example = "2026-07-04T19:00:00Z")]
    pub booking_date: String,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id().get(),
            name: booking.name().to_string(),
            table_number: booking.table_number().get(),
            no_of_guests: booking.no_of_guests().get(),
            booking_date: booking
                .booking_date()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

fn parse_name(raw: &str) -> ApiResult<GuestName> {
    GuestName::new(raw).map_err(|err| invalid_field_error(NAME, err))
}

fn parse_table_number(raw: i64) -> ApiResult<TableNumber> {
    TableNumber::new(raw).map_err(|err| invalid_field_error(TABLE_NUMBER, err))
}

fn parse_guest_count(raw: i64) -> ApiResult<GuestCount> {
    GuestCount::new(raw).map_err(|err| invalid_field_error(NO_OF_GUESTS, err))
}

impl TryFrom<BookingRequest> for BookingDraft {
    type Error = Error;

    fn try_from(value: BookingRequest) -> Result<Self, Self::Error> {
        let name = value.name.ok_or_else(|| missing_field_error(NAME))?;
        let table_number = value
            .table_number
            .ok_or_else(|| missing_field_error(TABLE_NUMBER))?;
        let no_of_guests = value
            .no_of_guests
            .ok_or_else(|| missing_field_error(NO_OF_GUESTS))?;
        let booking_date = value
            .booking_date
            .ok_or_else(|| missing_field_error(BOOKING_DATE))?;
        Ok(Self {
            name: parse_name(&name)?,
            table_number: parse_table_number(table_number)?,
            no_of_guests: parse_guest_count(no_of_guests)?,
            booking_date: parse_rfc3339_timestamp(booking_date, BOOKING_DATE)?,
        })
    }
}

impl TryFrom<BookingPatchRequest> for BookingPatch {
    type Error = Error;

    fn try_from(value: BookingPatchRequest) -> Result<Self, Self::Error> {
        let name = reject_null(value.name, NAME)?;
        let table_number = reject_null(value.table_number, TABLE_NUMBER)?;
        let no_of_guests = reject_null(value.no_of_guests, NO_OF_GUESTS)?;
        let booking_date = reject_null(value.booking_date, BOOKING_DATE)?;
        Ok(Self {
            name: name.as_deref().map(parse_name).transpose()?,
            table_number: table_number.map(parse_table_number).transpose()?,
            no_of_guests: no_of_guests.map(parse_guest_count).transpose()?,
            booking_date: parse_optional_rfc3339_timestamp(booking_date, BOOKING_DATE)?,
        })
    }
}

fn booking_id(raw: i64) -> ApiResult<BookingId> {
    BookingId::new(raw).map_err(|_| {
        Error::not_found(format!("booking {raw} not found"))
            .with_details(json!({ "id": raw, "code": "booking_not_found" }))
    })
}

/// List the caller's bookings.
#[utoipa::path(
    get,
    path = "/restaurant/booking/tables/",
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/restaurant/booking/tables")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let bookings = state.bookings_query.list_bookings(caller.user().id()).await?;
    Ok(web::Json(bookings.iter().map(BookingResponse::from).collect()))
}

/// Book a table for the caller.
#[utoipa::path(
    post,
    path = "/restaurant/booking/tables/",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/restaurant/booking/tables")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let draft = BookingDraft::try_from(payload.into_inner())?;
    let booking = state
        .bookings
        .create_booking(caller.user().id(), draft)
        .await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(&booking)))
}

/// Fetch one of the caller's bookings.
#[utoipa::path(
    get,
    path = "/restaurant/booking/tables/{id}/",
    params(("id" = i64, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking", body = BookingResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or owned by another user", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/restaurant/booking/tables/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BookingResponse>> {
    let id = booking_id(path.into_inner())?;
    let booking = state
        .bookings_query
        .get_booking(caller.user().id(), id)
        .await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Replace every field of one of the caller's bookings.
#[utoipa::path(
    put,
    path = "/restaurant/booking/tables/{id}/",
    params(("id" = i64, Path, description = "Booking identifier")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking replaced", body = BookingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or owned by another user", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "replaceBooking"
)]
#[put("/restaurant/booking/tables/{id}")]
pub async fn replace_booking(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<BookingRequest>,
) -> ApiResult<web::Json<BookingResponse>> {
    let id = booking_id(path.into_inner())?;
    let draft = BookingDraft::try_from(payload.into_inner())?;
    let booking = state
        .bookings
        .replace_booking(caller.user().id(), id, draft)
        .await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Update the supplied fields of one of the caller's bookings.
#[utoipa::path(
    patch,
    path = "/restaurant/booking/tables/{id}/",
    params(("id" = i64, Path, description = "Booking identifier")),
    request_body = BookingPatchRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or owned by another user", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "patchBooking"
)]
#[patch("/restaurant/booking/tables/{id}")]
pub async fn patch_booking(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<BookingPatchRequest>,
) -> ApiResult<web::Json<BookingResponse>> {
    let id = booking_id(path.into_inner())?;
    let patch = BookingPatch::try_from(payload.into_inner())?;
    let booking = state
        .bookings
        .patch_booking(caller.user().id(), id, patch)
        .await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Cancel one of the caller's bookings.
#[utoipa::path(
    delete,
    path = "/restaurant/booking/tables/{id}/",
    params(("id" = i64, Path, description = "Booking identifier")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or owned by another user", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "deleteBooking"
)]
#[delete("/restaurant/booking/tables/{id}")]
pub async fn delete_booking(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = booking_id(path.into_inner())?;
    state
        .bookings
        .delete_booking(caller.user().id(), id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
