//! Configuration types for demo data seeding.
//!
//! Every service owns its own database. Connection parameters are read from
//! environment entries prefixed with the upper-cased service name, e.g.
//! `ANNOUNCEMENT_DB_HOST`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Port used when `<SERVICE>_DB_PORT` is not set.
pub const DEFAULT_PORT: &str = "5432";

/// The services whose databases receive demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    User,
    Announcement,
    Application,
    Chat,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::User,
        Service::Announcement,
        Service::Application,
        Service::Chat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::User => "user",
            Service::Announcement => "announcement",
            Service::Application => "application",
            Service::Chat => "chat",
        }
    }

    /// Prefix of the service's environment entries.
    pub fn env_prefix(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters for one service database.
///
/// Values are not validated: anything missing is handed to the driver as-is
/// and shows up as a connection failure during the readiness wait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: Option<String>,
    pub port: String,
    pub database: Option<String>,
    pub user: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl DbConfig {
    /// Builds the parameters for `prefix` using `lookup` to resolve
    /// `<PREFIX>_DB_HOST`, `<PREFIX>_DB_PORT`, `<PREFIX>_DB_NAME`,
    /// `<PREFIX>_DB_USER` and `<PREFIX>_DB_PASSWORD`.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{prefix}_DB_{suffix}"));

        Self {
            host: var("HOST"),
            port: var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string()),
            database: var("NAME"),
            user: var("USER"),
            password: var("PASSWORD"),
        }
    }

    /// Name used in log lines; falls back to a placeholder when unset.
    pub fn database_name(&self) -> &str {
        self.database.as_deref().unwrap_or("<unset>")
    }
}

/// Reads the connection parameters of `service` from the process environment.
pub fn resolve_config(service: Service) -> DbConfig {
    DbConfig::from_lookup(&service.env_prefix(), |key| std::env::var(key).ok())
}

/// Bounded, fixed-delay retry budget for a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl WaitPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Budget for a database to start accepting connections.
    pub const fn database() -> Self {
        Self::new(30, Duration::from_secs(2))
    }

    /// Budget for a table to be created by its owning service's migrations.
    pub const fn table() -> Self {
        Self::new(60, Duration::from_secs(5))
    }
}

/// Configuration for a complete seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub user_db: DbConfig,
    pub announcement_db: DbConfig,
    pub application_db: DbConfig,
    pub chat_db: DbConfig,

    /// Retry budget while waiting for a database to accept connections.
    pub database_wait: WaitPolicy,

    /// Retry budget while waiting for a table to exist.
    pub table_wait: WaitPolicy,

    /// Seed for the random associations. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

/// Environment entry holding an optional RNG seed.
pub const RNG_SEED_VAR: &str = "SEEDER_RNG_SEED";

#[derive(Debug, thiserror::Error)]
#[error("{RNG_SEED_VAR} must be an unsigned integer, got {0:?}")]
pub struct InvalidRngSeed(pub String);

impl SeedConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, InvalidRngSeed> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvalidRngSeed>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = |service: Service| DbConfig::from_lookup(&service.env_prefix(), &lookup);

        let rng_seed = match lookup(RNG_SEED_VAR) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| InvalidRngSeed(raw))?),
            None => None,
        };

        Ok(Self {
            user_db: db(Service::User),
            announcement_db: db(Service::Announcement),
            application_db: db(Service::Application),
            chat_db: db(Service::Chat),
            database_wait: WaitPolicy::database(),
            table_wait: WaitPolicy::table(),
            rng_seed,
        })
    }

    /// Connection parameters of `service`.
    pub fn db(&self, service: Service) -> &DbConfig {
        match service {
            Service::User => &self.user_db,
            Service::Announcement => &self.announcement_db,
            Service::Application => &self.application_db,
            Service::Chat => &self.chat_db,
        }
    }
}
