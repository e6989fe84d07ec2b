//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversion into domain types goes through
//! the validated domain constructors in each repository module.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{auth_tokens, bookings, categories, menu_items, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    #[expect(dead_code, reason = "audit column not surfaced by the API")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
}

/// Insertable struct for issued tokens.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = auth_tokens)]
pub(crate) struct NewAuthTokenRow<'a> {
    pub digest: &'a str,
    pub user_id: Uuid,
}

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

/// Insertable struct for new categories.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub title: &'a str,
    pub slug: &'a str,
}

/// Row struct for reading from the menu_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MenuItemRow {
    pub id: i64,
    pub title: String,
    pub price_cents: i64,
    pub inventory: i32,
    pub category_id: Option<i64>,
}

/// Insertable and changeset struct for menu item fields.
///
/// `treat_none_as_null` lets a replacement clear the category.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = menu_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MenuItemValues<'a> {
    pub title: &'a str,
    pub price_cents: i64,
    pub inventory: i32,
    pub category_id: Option<i64>,
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub table_number: i32,
    pub no_of_guests: i32,
    pub booking_date: DateTime<Utc>,
}

/// Insertable struct for new bookings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub owner_id: Uuid,
    pub name: &'a str,
    pub table_number: i32,
    pub no_of_guests: i32,
    pub booking_date: DateTime<Utc>,
}

/// Changeset for replacing a booking's editable fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingUpdate<'a> {
    pub name: &'a str,
    pub table_number: i32,
    pub no_of_guests: i32,
    pub booking_date: DateTime<Utc>,
}
