//! Runs the seeders in dependency order and aggregates their outcomes.
//!
//! Order: reference data, users, usernames, announcements, applications,
//! discussions. Identifiers flow forward: usernames feed every later step and
//! announcement ids feed applications and discussions.

use std::process::ExitCode;

use rand::Rng;
use tracing::{error, info, warn};

use crate::config::{SeedConfig, Service};
use crate::db::{SeedError, SeedOutcome, ServiceDb};
use crate::seeders::{self, ChatCounts};

/// One method per seeding step.
#[allow(async_fn_in_trait)]
pub trait SeedSteps {
    async fn reference_data(&mut self) -> Result<(), SeedError>;

    async fn users(&mut self) -> Result<SeedOutcome<u64>, SeedError>;

    async fn usernames(&mut self) -> Result<Vec<String>, SeedError>;

    async fn announcements(
        &mut self,
        usernames: &[String],
    ) -> Result<SeedOutcome<Vec<i64>>, SeedError>;

    async fn applications(
        &mut self,
        announcement_ids: &[i64],
        usernames: &[String],
    ) -> Result<SeedOutcome<u64>, SeedError>;

    async fn discussions(
        &mut self,
        announcement_ids: &[i64],
        usernames: &[String],
    ) -> Result<SeedOutcome<ChatCounts>, SeedError>;
}

/// Steps backed by the real service databases.
pub struct LiveSteps<R> {
    user_db: ServiceDb,
    announcement_db: ServiceDb,
    application_db: ServiceDb,
    chat_db: ServiceDb,
    rng: R,
}

impl<R: Rng> LiveSteps<R> {
    pub fn new(config: &SeedConfig, rng: R) -> Self {
        Self {
            user_db: ServiceDb::from_seed_config(Service::User, config),
            announcement_db: ServiceDb::from_seed_config(Service::Announcement, config),
            application_db: ServiceDb::from_seed_config(Service::Application, config),
            chat_db: ServiceDb::from_seed_config(Service::Chat, config),
            rng,
        }
    }
}

impl<R: Rng> SeedSteps for LiveSteps<R> {
    async fn reference_data(&mut self) -> Result<(), SeedError> {
        seeders::seed_reference_data(&self.user_db, &self.announcement_db).await
    }

    async fn users(&mut self) -> Result<SeedOutcome<u64>, SeedError> {
        seeders::seed_users(&self.user_db, &mut self.rng).await
    }

    async fn usernames(&mut self) -> Result<Vec<String>, SeedError> {
        seeders::fetch_usernames(&self.user_db).await
    }

    async fn announcements(
        &mut self,
        usernames: &[String],
    ) -> Result<SeedOutcome<Vec<i64>>, SeedError> {
        seeders::seed_announcements(&self.announcement_db, usernames, &mut self.rng).await
    }

    async fn applications(
        &mut self,
        announcement_ids: &[i64],
        usernames: &[String],
    ) -> Result<SeedOutcome<u64>, SeedError> {
        seeders::seed_applications(
            &self.application_db,
            announcement_ids,
            usernames,
            &mut self.rng,
        )
        .await
    }

    async fn discussions(
        &mut self,
        announcement_ids: &[i64],
        usernames: &[String],
    ) -> Result<SeedOutcome<ChatCounts>, SeedError> {
        seeders::seed_discussions_and_messages(
            &self.chat_db,
            announcement_ids,
            usernames,
            &mut self.rng,
        )
        .await
    }
}

/// Aggregated result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Names of the steps that failed.
    pub failed_steps: Vec<&'static str>,
    /// Steps that were not invoked because a producer yielded nothing.
    pub skipped_steps: Vec<&'static str>,
    pub users_inserted: u64,
    pub users_found: usize,
    pub announcements_created: usize,
    pub applications_inserted: u64,
    pub discussions_created: usize,
    pub messages_created: usize,
}

impl RunReport {
    /// True when every invoked step succeeded.
    pub fn success(&self) -> bool {
        self.failed_steps.is_empty()
    }

    /// 0 on success, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.success() { 0 } else { 1 }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    fn fail(&mut self, step: &'static str, err: &SeedError) {
        error!(error = ?err, "Error seeding {step}: {err}");
        self.failed_steps.push(step);
    }

    fn log_summary(&self) {
        info!("Seed summary:");
        info!("  Users inserted: {}", self.users_inserted);
        info!("  Users found: {}", self.users_found);
        info!("  Announcements: {}", self.announcements_created);
        info!("  Applications: {}", self.applications_inserted);
        info!("  Discussions: {}", self.discussions_created);
        info!("  Messages: {}", self.messages_created);
        if !self.skipped_steps.is_empty() {
            info!("  Skipped: {}", self.skipped_steps.join(", "));
        }

        if self.success() {
            info!("All databases seeded successfully!");
        } else {
            error!("Some databases failed to seed: {}", self.failed_steps.join(", "));
        }
    }
}

/// Runs every step in order against `steps`.
pub async fn run<S: SeedSteps>(steps: &mut S) -> RunReport {
    let mut report = RunReport::default();

    info!("Step 1: Seeding reference data...");
    if let Err(e) = steps.reference_data().await {
        report.fail("reference data", &e);
    }

    info!("Step 2: Seeding users...");
    match steps.users().await {
        Ok(outcome) => report.users_inserted = outcome.seeded().unwrap_or(0),
        Err(e) => report.fail("users", &e),
    }

    // Lookup only; an error counts as "no users", not as a failed step
    let usernames = match steps.usernames().await {
        Ok(usernames) => usernames,
        Err(e) => {
            error!(error = ?e, "Error fetching usernames: {e}");
            Vec::new()
        }
    };
    report.users_found = usernames.len();

    if usernames.is_empty() {
        warn!("No users found, skipping dependent seeders");
        report
            .skipped_steps
            .extend(["announcements", "applications", "discussions"]);
        report.log_summary();
        return report;
    }

    info!("Step 3: Seeding announcements...");
    let announcement_ids = match steps.announcements(&usernames).await {
        Ok(outcome) => outcome.seeded().unwrap_or_default(),
        Err(e) => {
            report.fail("announcements", &e);
            Vec::new()
        }
    };
    report.announcements_created = announcement_ids.len();

    if announcement_ids.is_empty() {
        warn!("No announcements created");
    }

    info!("Step 4: Seeding applications...");
    if announcement_ids.is_empty() {
        warn!("Skipping applications seeding (no announcements)");
        report.skipped_steps.push("applications");
    } else {
        match steps.applications(&announcement_ids, &usernames).await {
            Ok(outcome) => report.applications_inserted = outcome.seeded().unwrap_or(0),
            Err(e) => report.fail("applications", &e),
        }
    }

    info!("Step 5: Seeding discussions and messages...");
    if announcement_ids.is_empty() {
        warn!("Skipping messages seeding (no announcements)");
        report.skipped_steps.push("discussions");
    } else {
        match steps.discussions(&announcement_ids, &usernames).await {
            Ok(outcome) => {
                let counts = outcome.seeded().unwrap_or_default();
                report.discussions_created = counts.discussions;
                report.messages_created = counts.messages;
            }
            Err(e) => report.fail("discussions", &e),
        }
    }

    report.log_summary();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted steps that record which ones were invoked.
    #[derive(Default)]
    struct FakeSteps {
        fail_reference: bool,
        fail_usernames: bool,
        fail_applications: bool,
        usernames: Vec<String>,
        announcement_ids: Vec<i64>,
        calls: Vec<&'static str>,
    }

    fn failure() -> SeedError {
        SeedError::DatabaseUnavailable {
            database: "fake".into(),
        }
    }

    impl SeedSteps for FakeSteps {
        async fn reference_data(&mut self) -> Result<(), SeedError> {
            self.calls.push("reference data");
            if self.fail_reference {
                Err(failure())
            } else {
                Ok(())
            }
        }

        async fn users(&mut self) -> Result<SeedOutcome<u64>, SeedError> {
            self.calls.push("users");
            Ok(SeedOutcome::Seeded(self.usernames.len() as u64))
        }

        async fn usernames(&mut self) -> Result<Vec<String>, SeedError> {
            self.calls.push("usernames");
            if self.fail_usernames {
                Err(failure())
            } else {
                Ok(self.usernames.clone())
            }
        }

        async fn announcements(
            &mut self,
            usernames: &[String],
        ) -> Result<SeedOutcome<Vec<i64>>, SeedError> {
            assert!(!usernames.is_empty());
            self.calls.push("announcements");
            Ok(SeedOutcome::Seeded(self.announcement_ids.clone()))
        }

        async fn applications(
            &mut self,
            announcement_ids: &[i64],
            _usernames: &[String],
        ) -> Result<SeedOutcome<u64>, SeedError> {
            assert_eq!(announcement_ids, self.announcement_ids.as_slice());
            self.calls.push("applications");
            if self.fail_applications {
                Err(failure())
            } else {
                Ok(SeedOutcome::Seeded(announcement_ids.len() as u64))
            }
        }

        async fn discussions(
            &mut self,
            announcement_ids: &[i64],
            _usernames: &[String],
        ) -> Result<SeedOutcome<ChatCounts>, SeedError> {
            self.calls.push("discussions");
            Ok(SeedOutcome::Seeded(ChatCounts {
                discussions: announcement_ids.len(),
                messages: announcement_ids.len() * 2,
            }))
        }
    }

    fn usernames() -> Vec<String> {
        vec!["alice_martin".into(), "bob_dupont".into()]
    }

    #[tokio::test]
    async fn test_full_run_in_order() {
        let mut steps = FakeSteps {
            usernames: usernames(),
            announcement_ids: vec![1, 2, 3],
            ..Default::default()
        };

        let report = run(&mut steps).await;

        assert_eq!(
            steps.calls,
            [
                "reference data",
                "users",
                "usernames",
                "announcements",
                "applications",
                "discussions"
            ]
        );
        assert!(report.success());
        assert_eq!(report.exit_status(), 0);
        assert_eq!(report.announcements_created, 3);
        assert_eq!(report.messages_created, 6);
    }

    #[tokio::test]
    async fn test_no_usernames_skips_dependents() {
        let mut steps = FakeSteps::default();

        let report = run(&mut steps).await;

        assert_eq!(steps.calls, ["reference data", "users", "usernames"]);
        assert!(report.success());
        assert_eq!(report.exit_status(), 0);
        assert_eq!(
            report.skipped_steps,
            ["announcements", "applications", "discussions"]
        );
    }

    #[tokio::test]
    async fn test_username_lookup_error_is_not_a_failure() {
        let mut steps = FakeSteps {
            usernames: usernames(),
            fail_usernames: true,
            ..Default::default()
        };

        let report = run(&mut steps).await;

        assert_eq!(steps.calls, ["reference data", "users", "usernames"]);
        assert!(report.failed_steps.is_empty());
        assert_eq!(report.exit_status(), 0);
        assert_eq!(report.users_found, 0);
        assert_eq!(
            report.skipped_steps,
            ["announcements", "applications", "discussions"]
        );
    }

    #[tokio::test]
    async fn test_no_usernames_keeps_earlier_failure() {
        let mut steps = FakeSteps {
            fail_reference: true,
            ..Default::default()
        };

        let report = run(&mut steps).await;

        assert!(!report.success());
        assert_eq!(report.exit_status(), 1);
        assert_eq!(report.failed_steps, ["reference data"]);
    }

    #[tokio::test]
    async fn test_no_announcements_skips_applications_and_discussions() {
        let mut steps = FakeSteps {
            usernames: usernames(),
            ..Default::default()
        };

        let report = run(&mut steps).await;

        assert_eq!(
            steps.calls,
            ["reference data", "users", "usernames", "announcements"]
        );
        assert!(report.success());
        assert_eq!(report.skipped_steps, ["applications", "discussions"]);
    }

    #[tokio::test]
    async fn test_failed_step_does_not_stop_later_steps() {
        let mut steps = FakeSteps {
            usernames: usernames(),
            announcement_ids: vec![7],
            fail_applications: true,
            ..Default::default()
        };

        let report = run(&mut steps).await;

        assert!(steps.calls.contains(&"discussions"));
        assert_eq!(report.failed_steps, ["applications"]);
        assert_eq!(report.exit_status(), 1);
    }
}
