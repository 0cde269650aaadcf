//! User service: users plus their language and specialisation links.

use rand::Rng;
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use tracing::{info, warn};

use super::timestamp_now;
use crate::db::{SeedError, SeedOutcome, ServiceDb, close_connection, count_rows};
use crate::generators::UserGenerator;

/// Seeds the sample roster into an empty `users` table.
///
/// Returns the number of users inserted.
pub async fn seed_users(db: &ServiceDb, rng: &mut impl Rng) -> Result<SeedOutcome<u64>, SeedError> {
    db.ensure_ready(&["users", "languages", "specialisations"])
        .await?;

    let mut conn = db.connect().await?;
    let result = insert_users(&mut conn, rng).await;
    close_connection(conn).await;
    result
}

async fn insert_users(
    conn: &mut PgConnection,
    rng: &mut impl Rng,
) -> Result<SeedOutcome<u64>, SeedError> {
    let mut tx = conn.begin().await?;

    let existing = count_rows(&mut tx, "users").await?;
    if existing > 0 {
        info!("User database already contains {existing} users, skipping seeding");
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    let languages: Vec<String> = sqlx::query_scalar("SELECT label FROM languages ORDER BY label")
        .fetch_all(&mut *tx)
        .await?;
    let specialisations: Vec<String> =
        sqlx::query_scalar("SELECT label FROM specialisations ORDER BY label")
            .fetch_all(&mut *tx)
            .await?;

    if languages.is_empty() || specialisations.is_empty() {
        warn!("Languages or specialisations not found, skipping user seeding");
        return Ok(SeedOutcome::Skipped {
            reason: "no languages or specialisations",
        });
    }

    info!("Seeding users...");

    let users = UserGenerator::new().generate_roster(&languages, &specialisations, rng);
    let registration_date = timestamp_now();
    let mut inserted = 0u64;

    for user in &users {
        let profile = &user.profile;

        let created: Option<String> = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, first_name, last_name, email, phone_number,
                               location, description, identity_verification,
                               registration_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (username) DO NOTHING
            RETURNING username
            "#,
        )
        .bind(profile.username)
        .bind(profile.first_name)
        .bind(profile.last_name)
        .bind(profile.email)
        .bind(profile.phone_number)
        .bind(profile.location)
        .bind(profile.description)
        .bind(user.identity_verification)
        .bind(registration_date)
        .fetch_optional(&mut *tx)
        .await?;

        // Links only for rows this run created
        if created.is_none() {
            continue;
        }
        inserted += 1;

        for language in &user.languages {
            sqlx::query(
                r#"
                INSERT INTO user_languages (username, language_label)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(profile.username)
            .bind(language)
            .execute(&mut *tx)
            .await?;
        }

        for specialisation in &user.specialisations {
            sqlx::query(
                r#"
                INSERT INTO user_specialisations (username, specialisation_label)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(profile.username)
            .bind(specialisation)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    info!("Seeded {inserted} users with languages and specialisations");
    Ok(SeedOutcome::Seeded(inserted))
}

/// Lists every username in the user database.
pub async fn fetch_usernames(db: &ServiceDb) -> Result<Vec<String>, SeedError> {
    let mut conn = db.connect().await?;

    let usernames: Result<Vec<String>, sqlx::Error> =
        sqlx::query_scalar("SELECT username FROM users ORDER BY username")
            .fetch_all(&mut conn)
            .await;

    close_connection(conn).await;
    Ok(usernames?)
}
