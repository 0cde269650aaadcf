//! Chat service: discussions about announcements and their messages.

use rand::Rng;
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use tracing::{info, warn};

use super::timestamp_now;
use crate::db::{SeedError, SeedOutcome, ServiceDb, close_connection, count_rows};
use crate::generators::ChatGenerator;

/// Rows written by the chat seeder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatCounts {
    pub discussions: usize,
    pub messages: usize,
}

/// Seeds discussions with messages into an empty `discussions` table.
pub async fn seed_discussions_and_messages(
    db: &ServiceDb,
    announcement_ids: &[i64],
    users: &[String],
    rng: &mut impl Rng,
) -> Result<SeedOutcome<ChatCounts>, SeedError> {
    db.ensure_ready(&["discussions", "messages"]).await?;

    let mut conn = db.connect().await?;
    let result = insert_discussions(&mut conn, announcement_ids, users, rng).await;
    close_connection(conn).await;
    result
}

async fn insert_discussions(
    conn: &mut PgConnection,
    announcement_ids: &[i64],
    users: &[String],
    rng: &mut impl Rng,
) -> Result<SeedOutcome<ChatCounts>, SeedError> {
    let mut tx = conn.begin().await?;

    let existing = count_rows(&mut tx, "discussions").await?;
    if existing > 0 {
        info!("Chat database already contains {existing} discussions, skipping seeding");
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    if announcement_ids.is_empty() || users.len() < 2 {
        warn!("Not enough announcements or users for seeding discussions");
        return Ok(SeedOutcome::Skipped {
            reason: "need announcements and at least two users",
        });
    }

    info!("Seeding discussions and messages...");

    let discussions =
        ChatGenerator::new().generate_batch(announcement_ids, users, timestamp_now(), rng);
    let mut counts = ChatCounts::default();

    for discussion in &discussions {
        let discussion_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO discussions (annonce_id, expediteur_id, destinataire_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id::bigint
            "#,
        )
        .bind(discussion.announcement_id)
        .bind(&discussion.sender)
        .bind(&discussion.recipient)
        .bind(discussion.created_at)
        .fetch_one(&mut *tx)
        .await?;
        counts.discussions += 1;

        for message in &discussion.messages {
            sqlx::query(
                r#"
                INSERT INTO messages (discussion_id, auteur_id, contenu, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(discussion_id)
            .bind(&message.author)
            .bind(&message.content)
            .bind(message.created_at)
            .execute(&mut *tx)
            .await?;
            counts.messages += 1;
        }
    }

    tx.commit().await?;

    info!(
        "Seeded {} discussions with {} messages",
        counts.discussions, counts.messages
    );
    Ok(SeedOutcome::Seeded(counts))
}
