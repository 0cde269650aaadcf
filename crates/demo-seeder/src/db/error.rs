use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid port {port:?} for database {database}")]
    InvalidPort { port: String, database: String },
    #[error("Database {database} is not reachable")]
    DatabaseUnavailable { database: String },
    #[error("Table '{table}' does not exist in {database}")]
    TableMissing { table: String, database: String },
    #[error("Seeding {step} did not complete")]
    Incomplete { step: &'static str },
}

/// What a seeder did when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome<T> {
    /// Rows were inserted.
    Seeded(T),
    /// The primary table already held `existing` rows; nothing was touched.
    AlreadySeeded { existing: i64 },
    /// A prerequisite was missing; nothing was touched.
    Skipped { reason: &'static str },
}

impl<T> SeedOutcome<T> {
    pub fn seeded(self) -> Option<T> {
        match self {
            SeedOutcome::Seeded(value) => Some(value),
            _ => None,
        }
    }
}
