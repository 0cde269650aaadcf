//! User generation from the fixed sample roster.

use rand::Rng;

use super::sample_between;

/// A hand-written demo profile.
#[derive(Debug, Clone, Copy)]
pub struct SampleProfile {
    pub username: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub phone_number: &'static str,
    pub location: &'static str,
    pub description: &'static str,
}

pub const SAMPLE_USERS: &[SampleProfile] = &[
    SampleProfile {
        username: "nauroy",
        first_name: "Christophe",
        last_name: "Nauroy",
        email: "christophe.nauroy@gmail.com",
        phone_number: "+33696969696",
        location: "Paris, France",
        description: "The best teacher of the world !",
    },
    SampleProfile {
        username: "alice_martin",
        first_name: "Alice",
        last_name: "Martin",
        email: "alice.martin@example.com",
        phone_number: "+33612345678",
        location: "Paris, France",
        description: "Experienced caregiver with 5 years of experience in home care.",
    },
    SampleProfile {
        username: "bob_dupont",
        first_name: "Bob",
        last_name: "Dupont",
        email: "bob.dupont@example.com",
        phone_number: "+33623456789",
        location: "Lyon, France",
        description: "Professional nurse specialized in medical care and medication management.",
    },
    SampleProfile {
        username: "charlie_bernard",
        first_name: "Charlie",
        last_name: "Bernard",
        email: "charlie.bernard@example.com",
        phone_number: "+33634567890",
        location: "Marseille, France",
        description: "Compassionate companion offering meal preparation and transportation services.",
    },
    SampleProfile {
        username: "diana_petit",
        first_name: "Diana",
        last_name: "Petit",
        email: "diana.petit@example.com",
        phone_number: "+33645678901",
        location: "Toulouse, France",
        description: "Housekeeping and personal care specialist with excellent references.",
    },
    SampleProfile {
        username: "emma_roux",
        first_name: "Emma",
        last_name: "Roux",
        email: "emma.roux@example.com",
        phone_number: "+33656789012",
        location: "Nice, France",
        description: "Physical therapy assistant and nursing care provider.",
    },
    SampleProfile {
        username: "frank_moreau",
        first_name: "Frank",
        last_name: "Moreau",
        email: "frank.moreau@example.com",
        phone_number: "+33667890123",
        location: "Bordeaux, France",
        description: "Retired professional offering companionship and home care services.",
    },
];

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub profile: SampleProfile,
    pub identity_verification: bool,
    /// Language labels to attach once the user row exists.
    pub languages: Vec<String>,
    /// Specialisation labels to attach once the user row exists.
    pub specialisations: Vec<String>,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Upper bound on languages attached to one user.
    pub max_languages: usize,
    /// Upper bound on specialisations attached to one user.
    pub max_specialisations: usize,
    /// Probability that a user is identity-verified.
    pub verified_probability: f64,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            max_languages: 3,
            max_specialisations: 3,
            verified_probability: 0.5,
        }
    }
}

/// Dresses the sample roster with random verification and skills.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single user from `profile`.
    pub fn generate(
        &self,
        profile: SampleProfile,
        languages: &[String],
        specialisations: &[String],
        rng: &mut impl Rng,
    ) -> GeneratedUser {
        GeneratedUser {
            profile,
            identity_verification: rng.gen_bool(self.config.verified_probability),
            languages: sample_between(languages, 1, self.config.max_languages, rng),
            specialisations: sample_between(
                specialisations,
                1,
                self.config.max_specialisations,
                rng,
            ),
        }
    }

    /// Generates one user per entry of [`SAMPLE_USERS`].
    pub fn generate_roster(
        &self,
        languages: &[String],
        specialisations: &[String],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedUser> {
        SAMPLE_USERS
            .iter()
            .map(|profile| self.generate(*profile, languages, specialisations, rng))
            .collect()
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_roster_has_unique_usernames() {
        let usernames: HashSet<_> = SAMPLE_USERS.iter().map(|p| p.username).collect();
        assert_eq!(usernames.len(), 7);
        assert!(usernames.contains("alice_martin"));
    }

    #[test]
    fn test_generate_roster() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let languages = labels(crate::generators::reference::LANGUAGES);
        let specialisations = labels(crate::generators::reference::SPECIALISATIONS);

        let users = user_gen.generate_roster(&languages, &specialisations, &mut rng);
        assert_eq!(users.len(), SAMPLE_USERS.len());

        for user in &users {
            assert!((1..=3).contains(&user.languages.len()));
            assert!((1..=3).contains(&user.specialisations.len()));

            // No duplicate associations for one user
            let langs: HashSet<_> = user.languages.iter().collect();
            assert_eq!(langs.len(), user.languages.len());
            let specs: HashSet<_> = user.specialisations.iter().collect();
            assert_eq!(specs.len(), user.specialisations.len());

            for lang in &user.languages {
                assert!(languages.contains(lang));
            }
        }
    }

    #[test]
    fn test_small_catalogs_cap_subset_size() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let languages = labels(&["French"]);
        let specialisations = labels(&["Plumber", "Painter"]);

        for _ in 0..20 {
            let user = user_gen.generate(SAMPLE_USERS[0], &languages, &specialisations, &mut rng);
            assert_eq!(user.languages, vec!["French".to_string()]);
            assert!((1..=2).contains(&user.specialisations.len()));
        }
    }

    #[test]
    fn test_verification_follows_probability() {
        let user_gen = UserGenerator::with_config(UserGenConfig {
            verified_probability: 1.0,
            ..Default::default()
        });
        let mut rng = rand::thread_rng();

        let users = user_gen.generate_roster(&[], &[], &mut rng);
        assert!(users.iter().all(|u| u.identity_verification));
        assert!(users.iter().all(|u| u.languages.is_empty()));
    }
}
