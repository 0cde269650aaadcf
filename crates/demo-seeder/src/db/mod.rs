//! Database plumbing shared by every seeder.
//!
//! Each service database is reached through a fresh [`PgConnection`](sqlx::PgConnection)
//! per operation. [`ServiceDb`] bundles a service's connection parameters with
//! its readiness budgets, and [`poll_until`] is the retry loop behind both
//! readiness waits.

mod connection;
mod error;
mod readiness;

pub use connection::{ServiceDb, close_connection, count_rows, open_connection};
pub use error::{SeedError, SeedOutcome};
pub use readiness::{await_database, await_table, poll_until};
