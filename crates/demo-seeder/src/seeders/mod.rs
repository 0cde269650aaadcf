//! Seeders: one per service database.
//!
//! Every seeder follows the same protocol:
//! 1. wait for the database and its tables,
//! 2. skip entirely if the primary table already has rows,
//! 3. gather prerequisites and skip with a warning if they are missing,
//! 4. insert the rows planned by the matching generator,
//! 5. commit once and close the connection.
//!
//! A database error abandons the open transaction, so nothing is partially
//! committed.

pub mod announcements;
pub mod applications;
pub mod chat;
pub mod reference;
pub mod users;

pub use announcements::seed_announcements;
pub use applications::seed_applications;
pub use chat::{ChatCounts, seed_discussions_and_messages};
pub use reference::seed_reference_data;
pub use users::{fetch_usernames, seed_users};

use time::{OffsetDateTime, PrimitiveDateTime};

/// Current UTC time without offset, matching the services' `TIMESTAMP` columns.
pub(crate) fn timestamp_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}
