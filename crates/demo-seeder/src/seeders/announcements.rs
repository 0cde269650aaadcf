//! Announcement service: templated announcements.

use rand::Rng;
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use tracing::{info, warn};

use super::timestamp_now;
use crate::db::{SeedError, SeedOutcome, ServiceDb, close_connection, count_rows};
use crate::generators::AnnouncementGenerator;

/// Seeds one announcement per template into an empty `announcements` table.
///
/// Returns the generated ids in insertion order. Dependent seeders treat any
/// outcome other than a non-empty `Seeded` as "nothing produced".
pub async fn seed_announcements(
    db: &ServiceDb,
    owners: &[String],
    rng: &mut impl Rng,
) -> Result<SeedOutcome<Vec<i64>>, SeedError> {
    db.ensure_ready(&["announcements", "care_types"]).await?;

    let mut conn = db.connect().await?;
    let result = insert_announcements(&mut conn, owners, rng).await;
    close_connection(conn).await;
    result
}

async fn insert_announcements(
    conn: &mut PgConnection,
    owners: &[String],
    rng: &mut impl Rng,
) -> Result<SeedOutcome<Vec<i64>>, SeedError> {
    let mut tx = conn.begin().await?;

    let existing = count_rows(&mut tx, "announcements").await?;
    if existing > 0 {
        info!(
            "Announcement database already contains {existing} announcements, skipping seeding"
        );
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    let care_type_ids: Vec<i64> = sqlx::query_scalar("SELECT id::bigint FROM care_types ORDER BY id")
        .fetch_all(&mut *tx)
        .await?;

    if care_type_ids.is_empty() {
        warn!("Care types not found, skipping announcement seeding");
        return Ok(SeedOutcome::Skipped {
            reason: "no care types",
        });
    }

    info!("Seeding announcements...");

    let announcements =
        AnnouncementGenerator::new().generate_batch(owners, &care_type_ids, timestamp_now(), rng);
    let mut ids = Vec::with_capacity(announcements.len());

    for announcement in &announcements {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO announcements (
                owner_username, title, location, description,
                specific_instructions, care_type_id, start_date, end_date,
                visit_frequency, remuneration, identity_verification_required,
                urgent_request, status, creation_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id::bigint
            "#,
        )
        .bind(&announcement.owner_username)
        .bind(&announcement.title)
        .bind(&announcement.location)
        .bind(&announcement.description)
        .bind(&announcement.specific_instructions)
        .bind(announcement.care_type_id)
        .bind(announcement.start_date)
        .bind(announcement.end_date)
        .bind(&announcement.visit_frequency)
        .bind(announcement.remuneration)
        .bind(announcement.identity_verification_required)
        .bind(announcement.urgent_request)
        .bind(announcement.status)
        .bind(announcement.creation_date)
        .fetch_one(&mut *tx)
        .await?;

        ids.push(id);
    }

    tx.commit().await?;

    info!("Seeded {} announcements", ids.len());
    Ok(SeedOutcome::Seeded(ids))
}
