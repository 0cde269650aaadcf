//! Application service: guardians applying to the seeded announcements.

use rand::Rng;
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use tracing::{info, warn};

use super::timestamp_now;
use crate::db::{SeedError, SeedOutcome, ServiceDb, close_connection, count_rows};
use crate::generators::ApplicationGenerator;

/// Seeds applications for `announcement_ids` into an empty `applications`
/// table.
///
/// Returns the number of rows actually inserted; duplicate
/// (announcement, guardian) pairs are ignored by the database.
pub async fn seed_applications(
    db: &ServiceDb,
    announcement_ids: &[i64],
    guardians: &[String],
    rng: &mut impl Rng,
) -> Result<SeedOutcome<u64>, SeedError> {
    db.ensure_ready(&["applications"]).await?;

    let mut conn = db.connect().await?;
    let result = insert_applications(&mut conn, announcement_ids, guardians, rng).await;
    close_connection(conn).await;
    result
}

async fn insert_applications(
    conn: &mut PgConnection,
    announcement_ids: &[i64],
    guardians: &[String],
    rng: &mut impl Rng,
) -> Result<SeedOutcome<u64>, SeedError> {
    let mut tx = conn.begin().await?;

    let existing = count_rows(&mut tx, "applications").await?;
    if existing > 0 {
        info!("Application database already contains {existing} applications, skipping seeding");
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    if announcement_ids.is_empty() || guardians.is_empty() {
        warn!("No announcements or guardians available for seeding applications");
        return Ok(SeedOutcome::Skipped {
            reason: "no announcements or guardians",
        });
    }

    info!("Seeding applications...");

    let applications = ApplicationGenerator::new().generate_batch(
        announcement_ids,
        guardians,
        timestamp_now(),
        rng,
    );
    let mut inserted = 0u64;

    for application in &applications {
        let result = sqlx::query(
            r#"
            INSERT INTO applications (annonce_id, guardian_username, status, date_candidature)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(application.announcement_id)
        .bind(&application.guardian_username)
        .bind(application.status.as_str())
        .bind(application.applied_at)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;

    info!("Seeded {inserted} applications");
    Ok(SeedOutcome::Seeded(inserted))
}
