//! Connection handling.

use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use tracing::{debug, error};

use super::error::SeedError;
use super::readiness::{await_database, await_table};
use crate::config::{DbConfig, SeedConfig, Service, WaitPolicy};

/// Translates connection parameters into driver options.
///
/// Unset values are left to the driver's own defaults.
fn connect_options(params: &DbConfig) -> Result<PgConnectOptions, SeedError> {
    let port: u16 = params.port.parse().map_err(|_| SeedError::InvalidPort {
        port: params.port.clone(),
        database: params.database_name().to_string(),
    })?;

    let mut options = PgConnectOptions::new().port(port);
    if let Some(host) = &params.host {
        options = options.host(host);
    }
    if let Some(database) = &params.database {
        options = options.database(database);
    }
    if let Some(user) = &params.user {
        options = options.username(user);
    }
    if let Some(password) = &params.password {
        options = options.password(password);
    }

    Ok(options)
}

/// Opens a new connection. The caller owns it and must hand it back to
/// [`close_connection`] when done.
pub async fn open_connection(params: &DbConfig) -> Result<PgConnection, SeedError> {
    let options = connect_options(params)?;
    Ok(PgConnection::connect_with(&options).await?)
}

/// Closes a connection, rolling back anything left uncommitted.
pub async fn close_connection(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        debug!("Error while closing connection: {e}");
    }
}

/// Returns the number of rows in `table`.
pub async fn count_rows(conn: &mut PgConnection, table: &str) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql).fetch_one(&mut *conn).await
}

/// One service database together with its readiness budgets.
#[derive(Debug, Clone)]
pub struct ServiceDb {
    pub service: Service,
    pub config: DbConfig,
    pub database_wait: WaitPolicy,
    pub table_wait: WaitPolicy,
}

impl ServiceDb {
    pub fn new(service: Service, config: DbConfig) -> Self {
        Self {
            service,
            config,
            database_wait: WaitPolicy::database(),
            table_wait: WaitPolicy::table(),
        }
    }

    /// Picks `service` out of a run configuration.
    pub fn from_seed_config(service: Service, seed_config: &SeedConfig) -> Self {
        Self {
            service,
            config: seed_config.db(service).clone(),
            database_wait: seed_config.database_wait,
            table_wait: seed_config.table_wait,
        }
    }

    pub fn with_waits(mut self, database_wait: WaitPolicy, table_wait: WaitPolicy) -> Self {
        self.database_wait = database_wait;
        self.table_wait = table_wait;
        self
    }

    /// Waits for the database, then for each of `tables` in order.
    pub async fn ensure_ready(&self, tables: &[&str]) -> Result<(), SeedError> {
        if !await_database(&self.config, self.database_wait).await {
            error!("Failed to connect to {} database", self.service);
            return Err(SeedError::DatabaseUnavailable {
                database: self.config.database_name().to_string(),
            });
        }

        for table in tables {
            if !await_table(&self.config, table, self.table_wait).await {
                error!("Table '{table}' does not exist");
                return Err(SeedError::TableMissing {
                    table: table.to_string(),
                    database: self.config.database_name().to_string(),
                });
            }
        }

        Ok(())
    }

    pub async fn connect(&self) -> Result<PgConnection, SeedError> {
        open_connection(&self.config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_rejects_bad_port() {
        let params = DbConfig {
            port: "not-a-port".into(),
            database: Some("users".into()),
            ..Default::default()
        };

        match connect_options(&params) {
            Err(SeedError::InvalidPort { port, database }) => {
                assert_eq!(port, "not-a-port");
                assert_eq!(database, "users");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_connect_options_keeps_port() {
        let params = DbConfig {
            host: Some("db".into()),
            port: "6000".into(),
            ..Default::default()
        };

        let options = connect_options(&params).unwrap();
        assert_eq!(options.get_port(), 6000);
        assert_eq!(options.get_host(), "db");
    }
}
