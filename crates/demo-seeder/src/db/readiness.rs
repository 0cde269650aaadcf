//! Readiness waits.
//!
//! The service databases and their schemas come up concurrently with the
//! seeder, so "not listening yet" and "listening but not migrated yet" are
//! retried separately with fixed delays.

use std::fmt::Display;
use std::future::Future;

use tracing::{error, info};

use super::connection::{close_connection, open_connection};
use super::error::SeedError;
use crate::config::{DbConfig, WaitPolicy};

/// Runs `probe` until it reports ready or `policy` is exhausted.
///
/// A probe error counts as "not ready yet". There is no sleep after the last
/// attempt.
pub async fn poll_until<F, Fut, E>(what: &str, policy: WaitPolicy, mut probe: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: Display,
{
    let max = policy.max_attempts;

    for attempt in 1..=max {
        let last = attempt == max;

        match probe().await {
            Ok(true) => {
                info!("{what} is ready!");
                return true;
            }
            Ok(false) if last => {
                error!("{what} not ready after {max} attempts");
            }
            Ok(false) => {
                info!(
                    "{what} not ready, retrying in {:?}... ({attempt}/{max})",
                    policy.delay
                );
            }
            Err(e) if last => {
                error!("{what} failed after {max} attempts: {e}");
            }
            Err(e) => {
                info!(
                    "{what} not ready, retrying in {:?}... ({attempt}/{max}): {e}",
                    policy.delay
                );
            }
        }

        if !last {
            tokio::time::sleep(policy.delay).await;
        }
    }

    false
}

/// Waits until a connection to `params` can be opened.
pub async fn await_database(params: &DbConfig, policy: WaitPolicy) -> bool {
    let database = params.database_name();
    info!("Waiting for database {database}...");

    poll_until(&format!("Database {database}"), policy, move || async move {
        let conn = open_connection(params).await?;
        close_connection(conn).await;
        Ok::<_, SeedError>(true)
    })
    .await
}

/// Waits until `table` exists in the `public` schema of `params`.
pub async fn await_table(params: &DbConfig, table: &str, policy: WaitPolicy) -> bool {
    info!(
        "Waiting for table '{table}' to exist in {}...",
        params.database_name()
    );

    poll_until(&format!("Table '{table}'"), policy, move || {
        table_exists(params, table)
    })
    .await
}

async fn table_exists(params: &DbConfig, table: &str) -> Result<bool, SeedError> {
    let mut conn = open_connection(params).await?;

    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = $1
        )
        "#,
    )
    .bind(table)
    .fetch_one(&mut conn)
    .await;

    close_connection(conn).await;
    Ok(exists?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FAST: WaitPolicy = WaitPolicy::new(5, Duration::ZERO);

    #[tokio::test]
    async fn test_poll_until_stops_when_ready() {
        let mut calls = 0;
        let ready = poll_until("probe", FAST, || {
            calls += 1;
            let n = calls;
            async move { Ok::<_, SeedError>(n >= 3) }
        })
        .await;

        assert!(ready);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_poll_until_exhausts_budget() {
        let mut calls = 0;
        let ready = poll_until("probe", FAST, || {
            calls += 1;
            async { Ok::<_, SeedError>(false) }
        })
        .await;

        assert!(!ready);
        assert_eq!(calls, FAST.max_attempts);
    }

    #[tokio::test]
    async fn test_poll_until_retries_errors() {
        let mut calls = 0;
        let ready = poll_until("probe", FAST, || {
            calls += 1;
            let n = calls;
            async move {
                if n < 4 {
                    Err(SeedError::Incomplete { step: "probe" })
                } else {
                    Ok(true)
                }
            }
        })
        .await;

        assert!(ready);
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn test_poll_until_zero_attempts() {
        let ready = poll_until("probe", WaitPolicy::new(0, Duration::ZERO), || async {
            Ok::<_, SeedError>(true)
        })
        .await;

        assert!(!ready);
    }

    #[tokio::test]
    async fn test_await_database_gives_up_on_bad_port() {
        let params = DbConfig {
            port: "nope".into(),
            ..Default::default()
        };

        assert!(!await_database(&params, WaitPolicy::new(2, Duration::ZERO)).await);
        assert!(!await_table(&params, "users", WaitPolicy::new(2, Duration::ZERO)).await);
    }
}
