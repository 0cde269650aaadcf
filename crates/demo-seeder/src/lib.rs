//! Demo data seeding for the care-platform services.
//!
//! Each service (user, announcement, application, chat) owns a PostgreSQL
//! database whose schema it migrates itself. This crate waits for those
//! databases and tables to come up, then fills empty tables with sample rows:
//! reference labels, a roster of users, announcements, applications and chat
//! discussions. A table that already has rows is left alone.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use demo_seeder::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let mut steps = LiveSteps::new(&config, rand::thread_rng());
//! let report = run(&mut steps).await;
//! std::process::exit(report.exit_status().into());
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod orchestrator;
pub mod seeders;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DbConfig, SeedConfig, Service, WaitPolicy, resolve_config};
    pub use crate::db::{SeedError, SeedOutcome, ServiceDb, await_database, await_table};
    pub use crate::generators::{
        AnnouncementGenerator, ApplicationGenerator, ChatGenerator, UserGenerator,
    };
    pub use crate::orchestrator::{LiveSteps, RunReport, SeedSteps, run};
    pub use crate::seeders::{
        fetch_usernames, seed_announcements, seed_applications, seed_discussions_and_messages,
        seed_reference_data, seed_users,
    };
}
