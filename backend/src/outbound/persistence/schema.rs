//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` after schema changes.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Nullable<Varchar>,
        /// Encoded `pbkdf2_sha256$<iterations>$<salt>$<digest>` password hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued auth tokens, keyed by the SHA-256 digest of the plaintext.
    /// `user_id` is unique: one live token per user.
    auth_tokens (digest) {
        digest -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Menu categories.
    categories (id) {
        id -> Int8,
        title -> Varchar,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Menu items. Prices are stored in cents.
    menu_items (id) {
        id -> Int8,
        title -> Varchar,
        price_cents -> Int8,
        inventory -> Int4,
        category_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Table reservations.
    bookings (id) {
        id -> Int8,
        owner_id -> Uuid,
        name -> Varchar,
        table_number -> Int4,
        no_of_guests -> Int4,
        booking_date -> Timestamptz,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(bookings -> users (owner_id));
diesel::joinable!(menu_items -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(auth_tokens, bookings, categories, menu_items, users,);
