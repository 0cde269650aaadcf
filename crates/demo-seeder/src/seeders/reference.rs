//! Reference data: lookup labels owned by the user and announcement services.

use sqlx::postgres::PgConnection;
use sqlx::{Connection, Postgres, QueryBuilder};
use tracing::{error, info};

use crate::db::{SeedError, SeedOutcome, ServiceDb, close_connection, count_rows};
use crate::generators::reference::{CARE_TYPES, LANGUAGES, SPECIALISATIONS};

/// Seeds the user and announcement lookup tables.
///
/// Both databases are always attempted; a failure in one is logged and does
/// not stop the other.
pub async fn seed_reference_data(
    user_db: &ServiceDb,
    announcement_db: &ServiceDb,
) -> Result<(), SeedError> {
    let mut complete = true;

    if let Err(e) = seed_user_reference(user_db).await {
        error!(error = ?e, "Error seeding user reference data: {e}");
        complete = false;
    }

    if let Err(e) = seed_care_types(announcement_db).await {
        error!(error = ?e, "Error seeding announcement reference data: {e}");
        complete = false;
    }

    if complete {
        Ok(())
    } else {
        Err(SeedError::Incomplete {
            step: "reference data",
        })
    }
}

/// Seeds `languages` and `specialisations` if either is empty.
pub async fn seed_user_reference(db: &ServiceDb) -> Result<SeedOutcome<u64>, SeedError> {
    db.ensure_ready(&["languages", "specialisations"]).await?;

    let mut conn = db.connect().await?;
    let result = insert_user_reference(&mut conn).await;
    close_connection(conn).await;
    result
}

async fn insert_user_reference(conn: &mut PgConnection) -> Result<SeedOutcome<u64>, SeedError> {
    let mut tx = conn.begin().await?;

    let language_count = count_rows(&mut tx, "languages").await?;
    let specialisation_count = count_rows(&mut tx, "specialisations").await?;

    if language_count > 0 && specialisation_count > 0 {
        info!(
            "User reference data already exists ({language_count} languages, \
             {specialisation_count} specialisations)"
        );
        return Ok(SeedOutcome::AlreadySeeded {
            existing: language_count + specialisation_count,
        });
    }

    info!("Seeding User Service reference data...");

    let languages = insert_labels(&mut tx, "languages", LANGUAGES).await?;
    info!("Seeded {languages} languages");

    let specialisations = insert_labels(&mut tx, "specialisations", SPECIALISATIONS).await?;
    info!("Seeded {specialisations} specialisations");

    tx.commit().await?;
    Ok(SeedOutcome::Seeded(languages + specialisations))
}

/// Seeds `care_types` if it is empty.
pub async fn seed_care_types(db: &ServiceDb) -> Result<SeedOutcome<u64>, SeedError> {
    db.ensure_ready(&["care_types"]).await?;

    let mut conn = db.connect().await?;
    let result = insert_care_types(&mut conn).await;
    close_connection(conn).await;
    result
}

async fn insert_care_types(conn: &mut PgConnection) -> Result<SeedOutcome<u64>, SeedError> {
    let mut tx = conn.begin().await?;

    let existing = count_rows(&mut tx, "care_types").await?;
    if existing > 0 {
        info!("Announcement reference data already exists ({existing} care types)");
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    info!("Seeding Announcement Service reference data...");

    let care_types = insert_labels(&mut tx, "care_types", CARE_TYPES).await?;
    info!("Seeded {care_types} care types");

    tx.commit().await?;
    Ok(SeedOutcome::Seeded(care_types))
}

/// Bulk-inserts `labels`, ignoring ones that already exist.
async fn insert_labels(
    conn: &mut PgConnection,
    table: &str,
    labels: &[&'static str],
) -> Result<u64, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("INSERT INTO {table} (label) "));
    builder.push_values(labels, |mut row, label| {
        row.push_bind(*label);
    });
    builder.push(" ON CONFLICT (label) DO NOTHING");

    let result = builder.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
