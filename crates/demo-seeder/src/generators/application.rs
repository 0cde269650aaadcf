//! Application generation: guardians applying to announcements.

use rand::Rng;
use time::PrimitiveDateTime;

use super::sample_between;

/// Status of an application, as stored by the application service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Sent,
    Accepted,
    Refused,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Sent,
        ApplicationStatus::Accepted,
        ApplicationStatus::Refused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Sent => "SENT",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Refused => "REFUSED",
        }
    }
}

/// Generated application ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedApplication {
    pub announcement_id: i64,
    pub guardian_username: String,
    pub status: ApplicationStatus,
    pub applied_at: PrimitiveDateTime,
}

/// Configuration for application generation.
#[derive(Debug, Clone)]
pub struct ApplicationGenConfig {
    /// Upper bound on applications per announcement.
    pub max_per_announcement: usize,
    /// Relative weights of sent, accepted and refused.
    pub status_weights: [u32; 3],
}

impl Default for ApplicationGenConfig {
    fn default() -> Self {
        Self {
            max_per_announcement: 3,
            // Mostly still pending
            status_weights: [70, 20, 10],
        }
    }
}

pub struct ApplicationGenerator {
    config: ApplicationGenConfig,
}

impl ApplicationGenerator {
    pub fn new() -> Self {
        Self {
            config: ApplicationGenConfig::default(),
        }
    }

    pub fn with_config(config: ApplicationGenConfig) -> Self {
        Self { config }
    }

    /// Generates 1 to `max_per_announcement` applications for one
    /// announcement, each from a different guardian.
    pub fn generate_for(
        &self,
        announcement_id: i64,
        guardians: &[String],
        applied_at: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedApplication> {
        sample_between(guardians, 1, self.config.max_per_announcement, rng)
            .into_iter()
            .map(|guardian_username| GeneratedApplication {
                announcement_id,
                guardian_username,
                status: self.generate_status(rng),
                applied_at,
            })
            .collect()
    }

    /// Generates applications for every announcement.
    pub fn generate_batch(
        &self,
        announcement_ids: &[i64],
        guardians: &[String],
        applied_at: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedApplication> {
        announcement_ids
            .iter()
            .flat_map(|&id| self.generate_for(id, guardians, applied_at, rng))
            .collect()
    }

    /// Draws a status according to the configured weights.
    fn generate_status(&self, rng: &mut impl Rng) -> ApplicationStatus {
        let total: u32 = self.config.status_weights.iter().sum();
        if total == 0 {
            return ApplicationStatus::Sent;
        }

        let roll = rng.gen_range(0..total);
        let mut cumulative = 0;

        for (status, &weight) in ApplicationStatus::ALL
            .iter()
            .zip(self.config.status_weights.iter())
        {
            cumulative += weight;
            if roll < cumulative {
                return *status;
            }
        }

        ApplicationStatus::Sent
    }
}

impl Default for ApplicationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};
    use time::macros::datetime;

    fn guardians(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("guardian_{i}")).collect()
    }

    #[test]
    fn test_batch_bounds_and_unique_pairs() {
        let application_gen = ApplicationGenerator::new();
        let mut rng = rand::thread_rng();
        let ids: Vec<i64> = (1..=8).collect();
        let guardians = guardians(7);

        let applications = application_gen.generate_batch(
            &ids,
            &guardians,
            datetime!(2026-03-01 10:00),
            &mut rng,
        );

        assert!((8..=24).contains(&applications.len()));

        let pairs: HashSet<_> = applications
            .iter()
            .map(|a| (a.announcement_id, a.guardian_username.clone()))
            .collect();
        assert_eq!(pairs.len(), applications.len());

        for id in &ids {
            let per_announcement = applications
                .iter()
                .filter(|a| a.announcement_id == *id)
                .count();
            assert!((1..=3).contains(&per_announcement));
        }
    }

    #[test]
    fn test_single_guardian() {
        let application_gen = ApplicationGenerator::new();
        let mut rng = rand::thread_rng();

        let applications = application_gen.generate_for(
            4,
            &guardians(1),
            datetime!(2026-03-01 10:00),
            &mut rng,
        );

        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0].guardian_username, "guardian_0");
    }

    #[test]
    fn test_no_guardians() {
        let application_gen = ApplicationGenerator::new();
        let mut rng = rand::thread_rng();

        let applications =
            application_gen.generate_batch(&[1, 2], &[], datetime!(2026-03-01 10:00), &mut rng);
        assert!(applications.is_empty());
    }

    #[test]
    fn test_status_weights() {
        let application_gen = ApplicationGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);

        let mut counts: HashMap<ApplicationStatus, usize> = HashMap::new();
        for _ in 0..10_000 {
            *counts
                .entry(application_gen.generate_status(&mut rng))
                .or_default() += 1;
        }

        let sent = counts[&ApplicationStatus::Sent];
        let accepted = counts[&ApplicationStatus::Accepted];
        let refused = counts[&ApplicationStatus::Refused];

        assert!((6_500..7_500).contains(&sent), "sent = {sent}");
        assert!((1_500..2_500).contains(&accepted), "accepted = {accepted}");
        assert!((500..1_500).contains(&refused), "refused = {refused}");
    }

    #[test]
    fn test_status_strings() {
        let labels: Vec<_> = ApplicationStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, ["SENT", "ACCEPTED", "REFUSED"]);
    }
}
