//! In-process adapters implementing the driven ports.
//!
//! Used when no database is configured and by HTTP tests. State lives behind
//! a `std::sync::Mutex` that is only held for synchronous map operations, so
//! no guard is ever carried across an `.await`.

mod accounts;
mod bookings;
mod catalogue;

pub use accounts::InMemoryAccounts;
pub use bookings::InMemoryBookings;
pub use catalogue::InMemoryCatalogue;

use std::sync::{Mutex, MutexGuard};

/// Lock a store, reporting poisoning as a message for the port error.
fn lock<T>(store: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    store
        .lock()
        .map_err(|_| "in-memory store lock poisoned".to_owned())
}
